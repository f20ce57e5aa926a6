use criterion::{black_box, criterion_group, criterion_main, Criterion};
use parser::{parse_source, Parser};

const FIB: &str = r#"
    fun fib(n) {
        if (n <= 1) return n;
        return fib(n - 2) + fib(n - 1);
    }

    print fib(10);
"#;

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("scan fib", |b| b.iter(|| scanner::scan(black_box(FIB)).unwrap()));

    let tokens = scanner::scan(FIB).unwrap();
    c.bench_function("parse fib", |b| {
        b.iter(|| Parser::new(black_box(tokens.clone())).parse().unwrap())
    });

    c.bench_function("long arithmetic", |b| {
        let source = format!("print {};", (1..100).map(|i| i.to_string()).collect::<Vec<_>>().join(" + "));
        b.iter(|| parse_source(black_box(&source)).unwrap())
    });

    c.bench_function("loops and blocks", |b| b.iter(|| {
        let source = r#"
            var sum = 0;
            for (var i = 0; i < 10; i = i + 1) {
                var j = i;
                while (j > 0) {
                    if (j == 3 or j == 5) sum = sum + j; else sum = sum - 1;
                    j = j - 1;
                }
            }
            print sum;
        "#;
        parse_source(black_box(source)).unwrap()
    }));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
