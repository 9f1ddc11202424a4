//! Tracing setup for the CLI.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tracing_tree::HierarchicalLayer;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Nothing is installed unless `TAO_LOG` (or,
/// failing that, `RUST_LOG`) is set, e.g. `TAO_LOG=tao_eval=debug`. Setting
/// `TAO_LOG_TREE` swaps the flat formatter for an indented call tree.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let Some(directives) = std::env::var("TAO_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok()
        else {
            return;
        };
        let filter = EnvFilter::new(directives);
        let registry = tracing_subscriber::registry().with(filter);
        if std::env::var_os("TAO_LOG_TREE").is_some() {
            registry
                .with(HierarchicalLayer::new(2).with_targets(true))
                .init();
        } else {
            registry
                .with(fmt::layer().with_target(true).with_level(true))
                .init();
        }
    });
}
