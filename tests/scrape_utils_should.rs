use cehennemi_edge::server::utils::scrape_utils::{fix_url, host_of};

const BASE: &str = "https://www.hdfilmcehennemi.la";

#[test]
fn test_keeps_absolute_urls() {
    assert_eq!(
        fix_url(BASE, "https://cdn.example.com/a.jpg").as_deref(),
        Some("https://cdn.example.com/a.jpg")
    );
}

#[test]
fn test_upgrades_schemeless_urls() {
    assert_eq!(
        fix_url(BASE, "//cdn.example.com/a.jpg").as_deref(),
        Some("https://cdn.example.com/a.jpg")
    );
}

#[test]
fn test_resolves_rooted_paths_against_the_base() {
    assert_eq!(
        fix_url(BASE, "/subs/a.vtt").as_deref(),
        Some("https://www.hdfilmcehennemi.la/subs/a.vtt")
    );
}

#[test]
fn test_resolves_relative_paths_against_the_base() {
    assert_eq!(
        fix_url("https://www.hdfilmcehennemi.la/film/", "sezon-2").as_deref(),
        Some("https://www.hdfilmcehennemi.la/film/sezon-2")
    );
}

#[test]
fn test_drops_empty_values() {
    assert_eq!(fix_url(BASE, ""), None);
    assert_eq!(fix_url(BASE, "   "), None);
}

#[test]
fn test_host_is_lowercased() {
    assert_eq!(
        host_of("https://VidMoly.TO/embed-x.html").as_deref(),
        Some("vidmoly.to")
    );
    assert_eq!(host_of("not an url"), None);
}
