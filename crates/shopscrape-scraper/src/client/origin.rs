//! Base URL normalization and domain extraction for the storefront client.

use crate::error::ScraperError;

/// Validates a storefront base URL and strips trailing slashes.
///
/// Given `"https://shop.example/"`, returns `"https://shop.example"`. Any path
/// component is kept (`"https://shop.example/en-gb/"` becomes
/// `"https://shop.example/en-gb"`), so both the listing URL and the derived
/// product URLs are built against the same root.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidBaseUrl`] if the URL does not parse, is not
/// `http`/`https`, or has no host.
pub fn normalize_base_url(base_url: &str) -> Result<String, ScraperError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let invalid = |reason: String| ScraperError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason,
    };

    let parsed = reqwest::Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "unsupported scheme \"{}\"; expected http or https",
            parsed.scheme()
        )));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host".to_owned()));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("query strings and fragments are not supported".to_owned()));
    }

    Ok(trimmed.to_owned())
}

/// Extracts the hostname from a base URL for use in log fields.
///
/// Falls back to the full URL string if parsing fails.
pub(super) fn extract_domain(base_url: &str) -> String {
    reqwest::Url::parse(base_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| base_url.to_owned())
}
