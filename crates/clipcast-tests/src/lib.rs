//! Integration test crate for ClipCast Studio.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on multiple clipcast crates to verify they work together.

#[cfg(test)]
mod timeline;

#[cfg(test)]
mod playback;

#[cfg(test)]
mod session;

/// Install a test-friendly tracing subscriber. Safe to call from every
/// test; only the first call wins.
#[cfg(test)]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}
