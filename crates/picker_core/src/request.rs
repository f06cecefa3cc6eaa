use thiserror::Error;
use url::Url;

use engine_logging::ACCESS_TOKEN_PARAM;

pub const COUNT_PARAM: &str = "count";
pub const DEFAULT_PAGE_SIZE: u32 = 33;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("invalid request url {url}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("no access token available")]
    MissingToken,
}

/// Completes a feed request URL with the token and page size.
///
/// Parameters already present on `base` (as on API-provided next-page URLs)
/// are kept verbatim. The token is only consulted when the URL lacks one.
pub fn build_request_url(
    base: &str,
    token: Option<&str>,
    page_size: u32,
) -> Result<Url, RequestError> {
    let mut url = Url::parse(base).map_err(|err| RequestError::InvalidUrl {
        url: base.to_string(),
        message: err.to_string(),
    })?;

    let has_token = has_param(&url, ACCESS_TOKEN_PARAM);
    let has_count = has_param(&url, COUNT_PARAM);

    if !has_token {
        // Blank means absent; a real token is sent exactly as stored.
        let token = token
            .filter(|token| !token.trim().is_empty())
            .ok_or(RequestError::MissingToken)?;
        url.query_pairs_mut().append_pair(ACCESS_TOKEN_PARAM, token);
    }
    if !has_count {
        url.query_pairs_mut()
            .append_pair(COUNT_PARAM, &page_size.to_string());
    }
    Ok(url)
}

fn has_param(url: &Url, name: &str) -> bool {
    url.query_pairs().any(|(key, _)| key == name)
}
