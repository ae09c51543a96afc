use std::{env, fs::read_to_string, process::ExitCode, time::Instant};

use jai_syntax::{parse, render_error};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: jai-parse <file.jai>");
        return ExitCode::from(2);
    }

    let file_path = &args[1];
    let file_contents = match read_to_string(file_path) {
        Ok(contents) => contents,
        Err(error) => {
            eprintln!("Failed to read {}: {}", file_path, error);
            return ExitCode::from(2);
        }
    };

    let start = Instant::now();
    let tree = parse(&file_contents);
    eprintln!("Parsed in {:?}", start.elapsed());

    println!("{}", tree.to_sexp());

    let errors = tree.errors();
    for error in &errors {
        eprintln!("-> {}", file_path);
        eprint!("{}", render_error(tree.text(), error));
    }

    if errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        eprintln!("{} error(s)", errors.len());
        ExitCode::FAILURE
    }
}
