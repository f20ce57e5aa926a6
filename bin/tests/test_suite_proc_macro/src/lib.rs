use quote::{format_ident, quote};

/// One `#[test]` per `.lox` file under `bin/tests/golden`, each checked
/// against the `.ast` file next to it.
#[proc_macro]
pub fn generate_tests(_: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let root_dir = format!("{}/../golden", env!("CARGO_MANIFEST_DIR"));
    let tests = walkdir::WalkDir::new(root_dir.clone())
        .sort_by_file_name()
        .into_iter()
        .flatten()
        .filter(|entry| entry.path().extension() == Some("lox".as_ref()))
        .map(|entry| {
            let source_path = entry.path().to_string_lossy().into_owned();
            let expected_path = entry.path().with_extension("ast").to_string_lossy().into_owned();
            let relative_test_path = entry
                .path()
                .strip_prefix(&root_dir)
                .unwrap_or(entry.path())
                .with_extension("")
                .to_string_lossy()
                .replace(['/', '-', '.'], "_");
            let test_ident = format_ident!("golden_{}", relative_test_path);
            quote! {
                #[test]
                fn #test_ident() {
                    syntax_expect(
                        std::fs::read_to_string(#source_path).unwrap().as_str(),
                        std::fs::read_to_string(#expected_path).unwrap().as_str(),
                    );
                }
            }
        });

    quote! {
        #[ctor::ctor]
        fn init() {
            let _ = env_logger::builder().is_test(true).try_init();
        }

        #(#tests)*
    }
    .into()
}
