//! Tao CLI.

use taoc::commands::{lex_file, parse_file, parse_run_args, run_file};
use taoc::logging::init_tracing;

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let result = match command.as_str() {
        "run" => run_command(&args[2..]),
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: tao lex <file.tao>");
                std::process::exit(1);
            }
            lex_file(&args[2])
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: tao parse <file.tao>");
                std::process::exit(1);
            }
            parse_file(&args[2])
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "version" | "--version" | "-V" => {
            println!("Tao {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        _ => {
            // If it looks like a file path, try to run it
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("tao"))
            {
                run_command(&args[1..])
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    };

    if let Err(message) = result {
        eprintln!("{message}");
        std::process::exit(1);
    }
}

fn run_command(args: &[String]) -> Result<(), String> {
    let (options, path) = parse_run_args(args).map_err(|e| format!("error: {e}"))?;
    let Some(path) = path else {
        eprintln!("error: missing file path");
        eprintln!("Usage: tao run <file.tao> [--quiet] [--max-depth=<n>]");
        std::process::exit(1);
    };
    run_file(&path, &options)
}

fn print_usage() {
    println!("Tao interpreter");
    println!();
    println!("Usage: tao <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.tao>       Run a Tao program");
    println!("  lex <file.tao>       Tokenize and display tokens");
    println!("  parse <file.tao>     Parse and display the statement tree");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Run options:");
    println!("  --quiet, -q          Discard print output");
    println!("  --max-depth=<n>      Maximum nested call depth (default 10000)");
    println!();
    println!("Environment:");
    println!("  TAO_LOG              Tracing filter, e.g. TAO_LOG=tao_eval=debug");
    println!("  TAO_LOG_TREE         Render traces as an indented tree");
    println!();
    println!("Examples:");
    println!("  tao run main.tao");
    println!("  tao main.tao --quiet");
    println!("  TAO_LOG=debug tao run main.tao");
}
