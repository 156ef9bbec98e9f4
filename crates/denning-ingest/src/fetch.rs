use std::time::Duration;
use tracing::info;

use crate::error::{IngestError, Result};

/// Check that `url` parses and uses http or https.
pub fn validate_url(url: &str) -> Result<url::Url> {
    let parsed = url::Url::parse(url).map_err(|e| IngestError::InvalidUrl(format!("{url}: {e}")))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(IngestError::InvalidUrl(format!(
            "Unsupported scheme: {} (only http/https allowed)",
            parsed.scheme()
        )));
    }
    Ok(parsed)
}

/// GET a page and return its body; any non-2xx status is a fetch failure.
pub fn fetch_page(url: &str, timeout: Duration) -> Result<String> {
    let parsed = validate_url(url)?;
    info!("Fetching text from {parsed}");
    let fetch_err = |reason: String| IngestError::Fetch { url: url.to_string(), reason };

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("denning-ingest/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(|e| fetch_err(e.to_string()))?;
    let response = client.get(parsed).send().map_err(|e| fetch_err(e.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(fetch_err(format!("server answered {status}")));
    }
    response.text().map_err(|e| fetch_err(format!("failed to read response body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_and_non_http_urls() {
        assert!(matches!(validate_url("not a url"), Err(IngestError::InvalidUrl(_))));
        assert!(matches!(validate_url("ftp://legislation.gov.uk/ukpga/1968/60"), Err(IngestError::InvalidUrl(_))));
        assert!(matches!(validate_url("file:///etc/passwd"), Err(IngestError::InvalidUrl(_))));
        assert!(validate_url("https://www.legislation.gov.uk/ukpga/1968/60").is_ok());
    }

    #[test]
    fn invalid_url_fails_before_any_request() {
        let err = fetch_page("mailto:someone@example.org", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, IngestError::InvalidUrl(_)));
    }
}
