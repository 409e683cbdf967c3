use std::time::Duration;
use translatable_core::error::TranslatableError;

/// HTTP client shared by the translators, bounded by `timeout` per request.
pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, TranslatableError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| TranslatableError::Config(format!("failed to build HTTP client: {e}")))
}
