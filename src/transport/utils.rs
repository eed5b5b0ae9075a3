use crate::external::Interop;

/// Picks the backend url: explicit argument, then the desktop shell, then the default.
/// Empty strings count as absent.
pub fn resolve_server_url(
    explicit: Option<&str>,
    interop: Option<&dyn Interop>,
    default: &str,
) -> String {
    if let Some(url) = explicit.filter(|url| !url.is_empty()) {
        return url.to_owned();
    }

    match interop.and_then(|interop| interop.server_url()) {
        Some(url) if !url.is_empty() => url,
        _ => default.to_owned(),
    }
}
