//! Jai syntax engine CLI.

use jaic::{commands, logging, CliError, CliOptions};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        None | Some("help" | "--help" | "-h") => {
            print_usage();
            return;
        }
        Some("version" | "--version" | "-V") => {
            println!("jaic {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        Some("explain" | "--explain") => {
            let Some(code) = args.get(1) else {
                eprintln!("Usage: jaic explain <ERROR_CODE>");
                eprintln!("Example: jaic explain E1008");
                std::process::exit(2);
            };
            match commands::explain(code) {
                Ok(text) => println!("{text}"),
                Err(error) => fail(&error),
            }
            return;
        }
        Some(_) => {}
    }

    let options = match CliOptions::from_args(&args) {
        Ok(options) => options,
        Err(error) => fail(&error),
    };
    logging::init(options.verbose);

    match commands::run(&options) {
        Ok(summary) => std::process::exit(summary.exit_code()),
        Err(error) => fail(&error),
    }
}

fn fail(error: &CliError) -> ! {
    eprintln!("error: {error}");
    if error.is_usage() {
        eprintln!();
        eprintln!("Run `jaic help` for usage.");
    }
    std::process::exit(error.exit_code());
}

fn print_usage() {
    println!("jaic: Jai syntax engine");
    println!();
    println!("Usage: jaic <command> [options] <files...>");
    println!();
    println!("Commands:");
    println!("  parse <files...>     Print the syntax tree of each file");
    println!("  lex <files...>       Print the token stream of each file");
    println!("  check <files...>     Report syntax errors only");
    println!("  explain <code>       Describe an error code (e.g., E1008)");
    println!("  help                 Show this help message");
    println!();
    println!("Options:");
    println!("  --format <fmt>       sexp (default), json or tokens");
    println!("  --max-errors <n>     Report at most n errors per file");
    println!("  --no-resync          Only resynchronize at `;` and `}}` after an error");
    println!("  --plain              One-line diagnostics without source snippets");
    println!("  -q, --quiet          No tree output or per-file status");
    println!("  -v, --verbose        Debug logging as an indented span tree");
    println!();
    println!("Use `-` to read from standard input. Set {} to filter log output", logging::LOG_ENV);
    println!("(e.g., {}=jai_parse=trace).", logging::LOG_ENV);
}
