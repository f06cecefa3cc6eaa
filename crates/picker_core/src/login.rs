use url::{form_urlencoded, Url};

use engine_logging::ACCESS_TOKEN_PARAM;

pub const AUTHORIZE_ENDPOINT: &str = "https://api.instagram.com/oauth/authorize/";

pub const GENERIC_LOGIN_ERROR: &str =
    "You need to authorise the application to allow photo picking. Please try again.";
pub const UNKNOWN_LOGIN_ERROR: &str = "An unknown error occurred. Please try again.";

/// Client registration used to start the implicit-grant login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginConfig {
    pub client_id: String,
    pub redirect_uri: String,
}

/// What a navigation inside the login browser means for the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    /// Not our redirect; let the browser keep loading.
    NotRedirect,
    /// Login succeeded and the token can be stored.
    Token(String),
    /// Login was refused or failed; the message is user facing.
    Denied(String),
}

pub fn authorize_url(config: &LoginConfig) -> Result<Url, url::ParseError> {
    Url::parse_with_params(
        AUTHORIZE_ENDPOINT,
        &[
            ("client_id", config.client_id.as_str()),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("response_type", "token"),
        ],
    )
}

/// Inspects a URL the login browser is about to load.
pub fn intercept_redirect(url: &str, redirect_uri: &str) -> RedirectOutcome {
    if redirect_uri.is_empty() || !url.starts_with(redirect_uri) {
        return RedirectOutcome::NotRedirect;
    }
    engine_logging::engine_debug!(
        "login redirect reached: {}",
        engine_logging::redact_access_token(url)
    );

    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(err) => {
            engine_logging::engine_warn!("unparsable login redirect: {}", err);
            return RedirectOutcome::Denied(UNKNOWN_LOGIN_ERROR.to_string());
        }
    };

    if query_value(&parsed, "error").is_some() {
        return RedirectOutcome::Denied(login_error_message(&parsed));
    }

    let token = parsed.fragment().and_then(|fragment| {
        form_urlencoded::parse(fragment.as_bytes())
            .find(|(key, _)| key == ACCESS_TOKEN_PARAM)
            .map(|(_, value)| value.into_owned())
    });
    match token {
        Some(token) if !token.trim().is_empty() => RedirectOutcome::Token(token),
        _ => {
            engine_logging::engine_warn!("login redirect carried no access token");
            RedirectOutcome::Denied(GENERIC_LOGIN_ERROR.to_string())
        }
    }
}

fn login_error_message(url: &Url) -> String {
    let Some(reason) = query_value(url, "error_reason") else {
        return UNKNOWN_LOGIN_ERROR.to_string();
    };
    if reason.eq_ignore_ascii_case("user_denied") {
        return GENERIC_LOGIN_ERROR.to_string();
    }
    query_value(url, "error_description").unwrap_or_else(|| GENERIC_LOGIN_ERROR.to_string())
}

// Values come back percent-decoded.
fn query_value(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
