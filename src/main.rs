//! # EZC
//!
//! A small stack-based scripting language.
//!

fn main() {
    init_tracing();
    ezc::term::main();
}

/// Diagnostics go to stderr, and only when `RUST_LOG` asks for them.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}
