use url::Url;

/// resolve whatever the markup hands us (absolute, schemeless, rooted or
/// relative) against the site base. None means the value isn't salvageable
/// and the caller should drop the entry instead of erroring
pub fn fix_url(base: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }

    if let Some(rest) = href.strip_prefix("//") {
        return Some(format!("https://{}", rest));
    }

    Url::parse(base).ok()?.join(href).ok().map(|u| u.to_string())
}

/// lowercased host of an url, used for the embed allow-list checks
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
}
