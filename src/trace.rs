//! Feature-gated tracing for the stores.
//!
//! With the `tracing` feature enabled this re-exports the `tracing` macros
//! the crate instruments with; disabled, the same names compile to nothing,
//! so instrumented call sites cost zero in default builds.

// When the tracing feature is enabled, re-export from the tracing crate.
#[cfg(feature = "tracing")]
pub use tracing::{debug, trace};

// When disabled, provide no-op replacements under the same names.
#[cfg(not(feature = "tracing"))]
mod noop {
    /// No-op trace macro
    #[macro_export]
    macro_rules! trace {
        ($($tt:tt)*) => {};
    }

    /// No-op debug macro
    #[macro_export]
    macro_rules! debug {
        ($($tt:tt)*) => {};
    }

    // Re-export the exported macros at module level.
    pub use crate::{debug, trace};
}

#[cfg(not(feature = "tracing"))]
pub use noop::*;

/// Initialize a stderr subscriber for tests and development.
///
/// Honors `RUST_LOG`-style filtering via `EnvFilter`; safe to call more than
/// once (later calls are ignored).
#[cfg(feature = "tracing")]
pub fn init_subscriber() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(false),
        )
        .with(filter)
        .try_init()
        .ok();
}

/// No-op when the tracing feature is disabled.
#[cfg(not(feature = "tracing"))]
pub fn init_subscriber() {}
