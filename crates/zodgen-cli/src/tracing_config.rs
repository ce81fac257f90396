//! Tracing setup for the `zodgen` binary.
//!
//! The subscriber is only installed when `ZODGEN_LOG` (or `RUST_LOG`) is set,
//! or when `--verbose` asks for debug output. Everything goes to stderr so
//! generated modules printed on stdout stay clean.
//!
//! ```bash
//! ZODGEN_LOG=zodgen_resolve=trace zodgen generate src/types.ts
//! ```

use tracing_subscriber::EnvFilter;

const VERBOSE_DIRECTIVES: &str =
    "warn,zodgen=debug,zodgen_core=debug,zodgen_parsers=debug,zodgen_resolve=debug,zodgen_output=debug";

/// `ZODGEN_LOG` wins over `RUST_LOG`; both use `RUST_LOG` syntax.
fn build_filter(verbose: bool) -> Option<EnvFilter> {
    if let Ok(val) = std::env::var("ZODGEN_LOG") {
        Some(EnvFilter::builder().parse_lossy(val))
    } else if std::env::var("RUST_LOG").is_ok() {
        Some(EnvFilter::from_default_env())
    } else if verbose {
        Some(EnvFilter::new(VERBOSE_DIRECTIVES))
    } else {
        None
    }
}

pub fn init_tracing(verbose: bool) {
    let Some(filter) = build_filter(verbose) else {
        return;
    };
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
