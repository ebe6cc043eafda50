//! Credential acquisition
//!
//! Fetches the short-lived test token from the companion HTTP
//! endpoint.

use serde::Deserialize;
use tracing::debug;

use super::ProbeError;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    test_token: Option<String>,
}

/// GET `<base>/test-token` and extract the token field
///
/// Any failure along the way (transport, non-success status, missing
/// field) surfaces as `CredentialUnavailable`; callers treat it as
/// fatal for the scenario, not for the run.
pub(crate) async fn fetch_test_token(
    http: &reqwest::Client,
    api_base: &str,
) -> Result<String, ProbeError> {
    let url = format!("{}/test-token", api_base.trim_end_matches('/'));
    debug!("Requesting test token from {url}");

    let response = http
        .get(&url)
        .send()
        .await
        .map_err(|e| ProbeError::CredentialUnavailable(e.to_string()))?;

    if !response.status().is_success() {
        return Err(ProbeError::CredentialUnavailable(format!(
            "{url} returned status {}",
            response.status()
        )));
    }

    let body: TokenResponse = response
        .json()
        .await
        .map_err(|e| ProbeError::CredentialUnavailable(format!("malformed token response: {e}")))?;

    body.test_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ProbeError::CredentialUnavailable("response missing test_token".to_string()))
}
