//! Tracing setup for the `tether` binary.
//!
//! ```bash
//! TETHER_LOG=debug tether classes.json
//! TETHER_LOG=tether_graph=trace TETHER_LOG_FORMAT=tree tether classes.json
//! ```
//!
//! `TETHER_LOG` takes precedence over `RUST_LOG`. With neither set no
//! subscriber is installed.

use std::sync::Once;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Registry};

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = match std::env::var("TETHER_LOG") {
            Ok(directives) => EnvFilter::builder().parse_lossy(directives),
            Err(_) if std::env::var("RUST_LOG").is_ok() => EnvFilter::from_default_env(),
            Err(_) => return,
        };

        let tree = std::env::var("TETHER_LOG_FORMAT")
            .is_ok_and(|format| format.eq_ignore_ascii_case("tree"));
        if tree {
            let layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);
            Registry::default().with(filter).with(layer).init();
        } else {
            let layer = fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr);
            Registry::default().with(filter).with(layer).init();
        }
    });
}
