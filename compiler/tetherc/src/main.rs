//! Tether CLI
//!
//! Generates the boundary shim and the TypeScript client for a set of
//! exported host classes.

use std::path::PathBuf;

use tetherc::{generate, load_decls, load_options, GenerateError, GenerateOptions};

struct Invocation {
    input: PathBuf,
    out_dir: PathBuf,
    config: Option<PathBuf>,
}

fn main() {
    tetherc::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        return;
    }

    let invocation = match parse_args(&args) {
        Ok(invocation) => invocation,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(err) = run(&invocation) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<Invocation, String> {
    let mut input = None;
    let mut out_dir = PathBuf::from(".");
    let mut config = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--out-dir" | "-o" => {
                let dir = iter.next().ok_or("--out-dir needs a directory")?;
                out_dir = PathBuf::from(dir);
            }
            "--config" | "-c" => {
                let file = iter.next().ok_or("--config needs a file")?;
                config = Some(PathBuf::from(file));
            }
            flag if flag.starts_with('-') => return Err(format!("unknown option `{flag}`")),
            path if input.is_none() => input = Some(PathBuf::from(path)),
            extra => return Err(format!("unexpected argument `{extra}`")),
        }
    }

    let input = input.ok_or("missing declarations file")?;
    Ok(Invocation {
        input,
        out_dir,
        config,
    })
}

fn run(invocation: &Invocation) -> Result<(), GenerateError> {
    let options = match &invocation.config {
        Some(path) => load_options(path)?,
        None => GenerateOptions::default(),
    };
    let decls = load_decls(&invocation.input)?;
    let artifacts = generate(&decls, &options)?;
    for path in artifacts.write_to(&invocation.out_dir, &options)? {
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn print_usage() {
    eprintln!("Tether interop generator");
    eprintln!();
    eprintln!("Usage: tether <classes.json> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --out-dir <dir>    Output directory (default: .)");
    eprintln!("  -c, --config <file>    JSON generator options");
    eprintln!("  -h, --help             Show this message");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TETHER_LOG             Tracing filter, e.g. `debug` (falls back to RUST_LOG)");
    eprintln!("  TETHER_LOG_FORMAT      `tree` for hierarchical output");
}
