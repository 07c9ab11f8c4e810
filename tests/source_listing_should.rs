use cehennemi_edge::server::services::cehennemi_services::{
    EmbedHost, classify_embed, find_embed_target, find_packed_payload, list_sources,
    list_subtitles,
};

const MAIN_URL: &str = "https://www.hdfilmcehennemi.la";

const TITLE_PAGE: &str = r#"
<html><body>
  <div class="alternative-links" data-lang="tr">
    <button class="alternative-link" data-video="abc123">Kaynak 1 (HDrip Xbet)</button>
    <button class="alternative-link" data-video="">Ölü Kaynak</button>
    <button class="alternative-link" data-video="def456">Kaynak 2</button>
  </div>
  <div class="alternative-links" data-lang="en">
    <button class="alternative-link" data-video="ghi789">Source EN</button>
  </div>
  <video>
    <track kind="captions" srclang="tr" src="/subs/a.vtt">
    <track kind="captions" srclang="en" src="https://cdn.example.com/b.vtt">
    <track kind="captions" srclang="de">
  </video>
</body></html>
"#;

#[test]
fn test_lists_sources_in_document_order() {
    let tuples = list_sources(TITLE_PAGE);

    assert_eq!(tuples.len(), 3);
    assert_eq!(tuples[0].video_id, "abc123");
    assert_eq!(tuples[1].video_id, "def456");
    assert_eq!(tuples[2].video_id, "ghi789");
}

#[test]
fn test_strips_the_promo_tag_from_labels() {
    let tuples = list_sources(TITLE_PAGE);

    assert_eq!(tuples[0].label, "Kaynak 1");
    assert_eq!(tuples[1].label, "Kaynak 2");
}

#[test]
fn test_uppercases_the_language_code() {
    let tuples = list_sources(TITLE_PAGE);

    assert_eq!(tuples[0].lang, "TR");
    assert_eq!(tuples[2].lang, "EN");
}

#[test]
fn test_skips_controls_without_a_video_id() {
    let tuples = list_sources(TITLE_PAGE);

    assert!(tuples.iter().all(|t| !t.video_id.is_empty()));
}

#[test]
fn test_a_page_without_controls_yields_nothing() {
    assert!(list_sources("<html><body><p>no players here</p></body></html>").is_empty());
}

#[test]
fn test_lists_subtitles_with_absolute_urls_and_uppercased_langs() {
    let tracks = list_subtitles(TITLE_PAGE, MAIN_URL);

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].url, "https://www.hdfilmcehennemi.la/subs/a.vtt");
    assert_eq!(tracks[0].lang, "TR");
    assert_eq!(tracks[1].url, "https://cdn.example.com/b.vtt");
    assert_eq!(tracks[1].lang, "EN");
}

#[test]
fn test_reads_the_deferred_iframe_source() {
    let html = r#"<iframe src="about:blank" data-src="https://player.example.net/e/1"></iframe>"#;

    assert_eq!(
        find_embed_target(html).as_deref(),
        Some("https://player.example.net/e/1")
    );
}

#[test]
fn test_no_iframe_means_no_embed() {
    assert_eq!(find_embed_target("<html><body></body></html>"), None);

    // an eager src alone doesn't count, it's a placeholder
    let html = r#"<iframe src="https://player.example.net/e/1"></iframe>"#;
    assert_eq!(find_embed_target(html), None);
}

#[test]
fn test_rewrites_the_vendor_redirector_onto_the_local_player_path() {
    let target = "https://rapidrame.com/iframe/embed?rapidrame_id=ABC123";

    assert_eq!(
        classify_embed(target, MAIN_URL),
        EmbedHost::Local("https://www.hdfilmcehennemi.la/rplayer/ABC123".to_string())
    );
}

#[test]
fn test_classifies_allow_listed_hosts_as_known() {
    let target = "https://vidmoly.to/embed-q1w2e3.html";

    assert_eq!(classify_embed(target, MAIN_URL), EmbedHost::Known(target.to_string()));
}

#[test]
fn test_everything_else_is_the_local_packed_player() {
    let target = "https://player.example.net/e/1";

    assert_eq!(classify_embed(target, MAIN_URL), EmbedHost::Local(target.to_string()));
}

#[test]
fn test_finds_the_packed_payload_in_inline_scripts() {
    let html = r#"
      <script>var unrelated = 1;</script>
      <script>window.addEventListener("load", function() { dc_hello("UGF5bG9hZA=="); });</script>
    "#;

    assert_eq!(find_packed_payload(html).as_deref(), Some("UGF5bG9hZA=="));
}

#[test]
fn test_a_player_page_without_the_call_yields_nothing() {
    assert_eq!(
        find_packed_payload("<script>console.log('nothing to see');</script>"),
        None
    );
}
