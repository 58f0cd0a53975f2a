//! Weblang CLI
//!
//! Lexes, parses and evaluates Weblang programs.

use weblangc::commands::{format_file, lex_file, parse_file, parse_run_options, run_file};

fn main() {
    weblangc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            let (options, path) = match parse_run_options(&args[2..]) {
                Ok(parsed) => parsed,
                Err(msg) => {
                    eprintln!("error: {msg}");
                    std::process::exit(1);
                }
            };
            let Some(path) = path else {
                eprintln!("error: missing file path");
                eprintln!("Usage: weblang run <file|-> [--max-depth=<n>] [--time]");
                std::process::exit(1);
            };
            run_file(&path, &options);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: weblang lex <file>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: weblang parse <file>");
                std::process::exit(1);
            }
            parse_file(&args[2]);
        }
        "fmt" => {
            if args.len() < 3 {
                eprintln!("Usage: weblang fmt <file>");
                std::process::exit(1);
            }
            format_file(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("Weblang {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Weblang interpreter");
    println!();
    println!("Usage: weblang <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file|->       Evaluate a program (`-` reads stdin)");
    println!("  lex <file>         Tokenize and display tokens");
    println!("  parse <file>       Parse and display the program tree");
    println!("  fmt <file>         Print a program in canonical form");
    println!("  help               Show this help message");
    println!("  version            Show version information");
    println!();
    println!("Run options:");
    println!("  --max-depth=<n>    Fail past <n> nested function calls");
    println!("  --time             Print total run time to stderr");
    println!();
    println!("Environment:");
    println!("  RUST_LOG           Tracing filter, e.g. RUST_LOG=weblang_eval=trace");
    println!("  WEBLANG_LOG_TREE   Set to 1 for hierarchical trace output");
    println!();
    println!("Examples:");
    println!("  weblang run fib.wl");
    println!("  echo 'println(fib(20))' | weblang run -");
    println!("  weblang run deep.wl --max-depth=10000");
}
