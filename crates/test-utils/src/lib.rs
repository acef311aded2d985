//! Shared fixtures for orgcrawler's integration tests: scripted accounts,
//! organization and config builders, and async helpers.

pub mod builders;
pub mod fake_account;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

/// Upper bound for any single awaited crawler call in tests.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

static INIT: Once = Once::new();

/// Capture crawler logs per test; they show up only for failing tests.
///
/// Reads the same `ORGCRAWLER_LOG` filter as the binary, default `warn` so
/// expected payload failures stay quiet.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("ORGCRAWLER_LOG")
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Await `f`, failing the test if it takes longer than [`TEST_TIMEOUT`].
///
/// A hung worker pool or a collector waiting on a lost job shows up as a
/// timeout instead of a stuck test run.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(TEST_TIMEOUT, f).await {
        Ok(value) => value,
        Err(_) => panic!("crawler call did not finish within {TEST_TIMEOUT:?}"),
    }
}
