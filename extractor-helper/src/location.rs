//! Next page link resolution.
//!
//! Listing sites link their pages with two conventions, both handled here
//! without RFC 3986 reference resolution:
//!
//! * `p2.html` replaces the last path component of the source URL,
//! * `/other/p2.html` is appended to `scheme://host[:port]`.
//!
//! The combined string is only validated by parsing, it is returned as
//! written so `../` or query parts stay untouched.

use url::Url;

fn origin(source: &Url) -> Option<String> {
    let host = source.host_str()?;
    match source.port() {
        Some(port) => Some(format!("{}://{host}:{port}", source.scheme())),
        None => Some(format!("{}://{host}", source.scheme())),
    }
}

fn directory(source: &Url) -> &str {
    let path = source.path().trim_end_matches('/');
    match path.rfind('/') {
        Some(index) => &path[..=index],
        None => "/",
    }
}

fn validate(candidate: String) -> Option<String> {
    Url::parse(candidate.as_str()).ok().map(|_| candidate)
}

/// Drops the last path component of `source` and appends `href`.
pub fn resolve_from_directory(source: &str, href: &str) -> Option<String> {
    let source = Url::parse(source).ok()?;
    let origin = origin(&source)?;
    validate(format!("{origin}{}{href}", directory(&source)))
}

/// Appends `href` to the scheme and authority of `source`.
pub fn resolve_from_root(source: &str, href: &str) -> Option<String> {
    let source = Url::parse(source).ok()?;
    let origin = origin(&source)?;
    validate(format!("{origin}{href}"))
}

/// Picks the rule from the first character of `href`.
pub fn resolve(source: &str, href: &str) -> Option<String> {
    if href.starts_with('/') {
        resolve_from_root(source, href)
    } else {
        resolve_from_directory(source, href)
    }
}
