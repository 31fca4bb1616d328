//! `dsgen [SPEC] [SHELL]`
//!
//! Writes the generated class to stdout. Nothing is written to stdout when
//! generation fails.

use std::io::Write;
use std::path::Path;

use dsgenc::{
    generate_class, init_tracing, read_source, ShellMarkers, DEFAULT_SHELL_PATH,
    DEFAULT_SPEC_PATH,
};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() > 2 {
        eprintln!("Usage: dsgen [SPEC] [SHELL]");
        eprintln!();
        eprintln!("  SPEC   operation specification (default: {DEFAULT_SPEC_PATH})");
        eprintln!("  SHELL  host class template (default: {DEFAULT_SHELL_PATH})");
        std::process::exit(1);
    }
    let spec_path = args.first().map_or(DEFAULT_SPEC_PATH, String::as_str);
    let shell_path = args.get(1).map_or(DEFAULT_SHELL_PATH, String::as_str);

    let result = read_source(Path::new(spec_path)).and_then(|spec| {
        let shell = read_source(Path::new(shell_path))?;
        generate_class(&spec, &shell, &ShellMarkers::default())
    });

    match result {
        Ok(class) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(err) = stdout.write_all(class.as_bytes()).and_then(|()| stdout.flush()) {
                eprintln!("error: cannot write output: {err}");
                std::process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("{}", err.report());
            std::process::exit(1);
        }
    }
}
