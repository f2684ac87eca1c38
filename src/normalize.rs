use url::Url;

/// Reduces a URL to the key used for visited-page deduplication.
///
/// The key is the lowercased host plus the path with one trailing slash
/// removed. Scheme, query, and fragment are discarded, so two URLs that
/// differ only in those parts map to the same page.
pub fn normalize_url(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default().to_lowercase();
    let path = url.path();
    let path = path.strip_suffix('/').unwrap_or(path);
    format!("{}{}", host, path)
}
