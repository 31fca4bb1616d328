//! Dataset function generator.
//!
//! Reads an operation specification, expands every operation for every
//! numeric storage kind and splices the generated methods into a host Java
//! template.
//!
//! ```text
//! functions.txt ──▶ SpecParser ──▶ Driver ──▶ Expansion/Transcoder ──▶ body
//! MathsPreface.java ─────────────────────────────────▶ stitch(body) ──▶ Maths.java
//! ```

pub mod driver;
pub mod stitch;

use std::path::Path;
use std::sync::Once;

use dsgen_diagnostic::{GenError, GenResult};

pub use driver::{transition, Driver, Event, State};
pub use stitch::{stitch, ShellMarkers};

/// Specification read when no path is given.
pub const DEFAULT_SPEC_PATH: &str = "functions.txt";

/// Host template read when no path is given.
pub const DEFAULT_SHELL_PATH: &str = "MathsPreface.java";

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber for debug output.
///
/// Set `RUST_LOG=dsgen_codegen=trace` (or `debug`) to see generation logs on
/// stderr.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

/// Generated methods for every operation in `spec`.
pub fn generate(spec: &str) -> GenResult<String> {
    Driver::new(spec).run()
}

/// The complete class: `shell` with the generated methods spliced in.
pub fn generate_class(spec: &str, shell: &str, markers: &ShellMarkers) -> GenResult<String> {
    let body = generate(spec)?;
    stitch(shell, &body, markers)
}

/// Read an input file.
pub fn read_source(path: &Path) -> GenResult<String> {
    std::fs::read_to_string(path).map_err(|source| GenError::io(path.display().to_string(), source))
}
