//! Share link composition and fragment parsing.

use once_cell::sync::Lazy;
use regex::Regex;

static SHARE_PARAM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^#?|&)share=([^&]+)").expect("valid share param regex"));

/// Extracts the token from a `share=<token>` fragment parameter.
///
/// Accepts the fragment with or without its leading `#`; other `&`-separated
/// parameters are ignored.
pub fn share_token_from_fragment(fragment: &str) -> Option<&str> {
    SHARE_PARAM_RE
        .captures(fragment)
        .and_then(|caps| caps.get(1))
        .map(|token| token.as_str())
}

/// Builds `<base>#share=<token>`.
pub fn compose_share_url(base_url: &str, token: &str) -> String {
    format!("{base_url}#share={token}")
}

/// Strips the query and fragment from a URL, leaving origin and path.
pub fn base_url_of(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}

/// Returns the fragment of a URL without its leading `#`.
pub fn fragment_of(url: &str) -> Option<&str> {
    url.split_once('#').map(|(_, fragment)| fragment)
}
