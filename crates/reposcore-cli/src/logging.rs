// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the reposcore CLI.
//!
//! Uses `tracing` with `tracing-subscriber` for structured logging on stderr.
//! Log level can be controlled via the `RUST_LOG` environment variable.
//!
//! # Examples
//!
//! ```bash
//! # Default: warnings only
//! reposcore top --language rust
//!
//! # Follow pagination and retries
//! RUST_LOG=reposcore_core=debug reposcore top --language rust
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is unset.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "reposcore=debug,reposcore_core=debug,reqwest=warn"
    } else {
        "reposcore=warn,reposcore_core=warn,reqwest=error"
    }
}

/// Initialize the logging subsystem.
///
/// `RUST_LOG` takes precedence over the `-v` flag.
pub fn init_logging(verbose: bool) {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters_parse() {
        for verbose in [false, true] {
            assert!(EnvFilter::try_new(default_filter(verbose)).is_ok());
        }
    }
}
