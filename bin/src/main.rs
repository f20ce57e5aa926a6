use std::{
    io::{stdin, stdout, Write},
    path::PathBuf,
};

use anyhow::anyhow;
use clap::Parser;
use itertools::Itertools;
use log::info;

use parser::SyntaxError;

#[derive(clap::Parser)]
struct Args {
    file: Option<PathBuf>,

    /// Print the scanned tokens instead of the syntax tree
    #[arg(long)]
    tokens: bool,
}

fn run_file(path: PathBuf, args: &Args) -> anyhow::Result<()> {
    info!("Running {}", path.display());
    run(&std::fs::read_to_string(path)?, args)
}

fn run_prompt(args: &Args) -> anyhow::Result<()> {
    loop {
        print!("> ");
        stdout().flush()?;
        let mut line = String::new();
        if stdin().read_line(&mut line)? == 0 {
            return Ok(());
        }
        if let Err(e) = run(&line, args) {
            println!("{}", e);
        }
    }
}

fn run(source: &str, args: &Args) -> anyhow::Result<()> {
    let output = if args.tokens { tokens(source) } else { statements(source) };
    let output = output.map_err(|e| {
        let location = e.span().location(source);
        anyhow!("error ({location}): {e}")
    })?;

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

fn tokens(source: &str) -> Result<String, SyntaxError> {
    Ok(scanner::scan(source)?.iter().join("\n"))
}

fn statements(source: &str) -> Result<String, SyntaxError> {
    Ok(parser::parse_source(source)?.iter().join("\n"))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let mut args = Args::parse();

    match args.file.take() {
        Some(file) => run_file(file, &args),
        None => run_prompt(&args),
    }
}
