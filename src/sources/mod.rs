//! HTTP collaborators: the repairer search backend and the geocoding
//! provider.

use std::sync::LazyLock;
use std::time::Duration;

pub mod geocode;
pub mod repairers;

/// Shared HTTP client with connection pooling for all outbound requests.
static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .user_agent(concat!("fixmap/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
});

pub(crate) fn client() -> &'static reqwest::Client {
    &HTTP_CLIENT
}
