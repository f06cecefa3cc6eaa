use picker_core::{
    authorize_url, intercept_redirect, LoginConfig, RedirectOutcome, GENERIC_LOGIN_ERROR,
    UNKNOWN_LOGIN_ERROR,
};

const REDIRECT: &str = "https://picker.example.com/callback";

#[test]
fn authorize_url_requests_implicit_grant() {
    let config = LoginConfig {
        client_id: "abc123".to_string(),
        redirect_uri: REDIRECT.to_string(),
    };
    let url = authorize_url(&config).unwrap();
    assert_eq!(url.host_str(), Some("api.instagram.com"));
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(
        pairs,
        vec![
            ("client_id".to_string(), "abc123".to_string()),
            ("redirect_uri".to_string(), REDIRECT.to_string()),
            ("response_type".to_string(), "token".to_string()),
        ]
    );
}

#[test]
fn foreign_navigation_is_not_intercepted() {
    assert_eq!(
        intercept_redirect("https://api.instagram.com/accounts/login/", REDIRECT),
        RedirectOutcome::NotRedirect
    );
}

#[test]
fn token_is_taken_from_fragment() {
    assert_eq!(
        intercept_redirect(&format!("{REDIRECT}#access_token=123.abc"), REDIRECT),
        RedirectOutcome::Token("123.abc".to_string())
    );
}

#[test]
fn user_denied_gets_generic_message() {
    let url = format!("{REDIRECT}?error=access_denied&error_reason=user_denied");
    assert_eq!(
        intercept_redirect(&url, REDIRECT),
        RedirectOutcome::Denied(GENERIC_LOGIN_ERROR.to_string())
    );
}

#[test]
fn other_errors_use_decoded_description() {
    let url = format!(
        "{REDIRECT}?error=invalid_scope&error_reason=bad_scope&error_description=Scope%20not%20allowed"
    );
    assert_eq!(
        intercept_redirect(&url, REDIRECT),
        RedirectOutcome::Denied("Scope not allowed".to_string())
    );
}

#[test]
fn error_without_reason_is_unknown() {
    let url = format!("{REDIRECT}?error=server_error");
    assert_eq!(
        intercept_redirect(&url, REDIRECT),
        RedirectOutcome::Denied(UNKNOWN_LOGIN_ERROR.to_string())
    );
}

#[test]
fn redirect_without_token_is_denied() {
    assert_eq!(
        intercept_redirect(REDIRECT, REDIRECT),
        RedirectOutcome::Denied(GENERIC_LOGIN_ERROR.to_string())
    );
}
