use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use cehennemi_edge::server::error::Error;
use cehennemi_edge::server::utils::decode_utils::decode_packed_url;

/// the site's real encoding recipe: base64, reverse, base64 again
fn pack(plain: &str) -> String {
    let inner = STANDARD.encode(plain);
    let reversed: String = inner.chars().rev().collect();
    STANDARD.encode(reversed)
}

#[test]
fn test_decodes_a_packed_playlist_url() {
    let packed = pack("https://cdn.example.com/hls/movie/master.m3u8");

    assert_eq!(
        decode_packed_url(&packed).unwrap(),
        "https://cdn.example.com/hls/movie/master.m3u8"
    );
}

#[test]
fn test_strips_at_the_last_plus_delimiter() {
    // real payloads carry a junk token ahead of the url
    let packed = pack("token123+https://cdn.example.com/v/file.m3u8");

    assert_eq!(
        decode_packed_url(&packed).unwrap(),
        "https://cdn.example.com/v/file.m3u8"
    );
}

#[test]
fn test_plus_wins_over_space() {
    // '+' is checked first, so the space must never split this one
    let packed = pack("abc+def xyz");

    assert_eq!(decode_packed_url(&packed).unwrap(), "https://def xyz");
}

#[test]
fn test_space_splits_when_no_plus_present() {
    let packed = pack("x y cdn.example.com/z.mp4");

    assert_eq!(
        decode_packed_url(&packed).unwrap(),
        "https://cdn.example.com/z.mp4"
    );
}

#[test]
fn test_pipe_is_the_last_resort_delimiter() {
    let packed = pack("a|b|cdn.example.com/v.mp4");

    assert_eq!(
        decode_packed_url(&packed).unwrap(),
        "https://cdn.example.com/v.mp4"
    );
}

#[test]
fn test_prepends_https_when_scheme_is_missing() {
    let packed = pack("example.com/x");

    assert_eq!(decode_packed_url(&packed).unwrap(), "https://example.com/x");
}

#[test]
fn test_keeps_an_explicit_http_scheme() {
    let packed = pack("http://example.com/x");

    assert_eq!(decode_packed_url(&packed).unwrap(), "http://example.com/x");
}

#[test]
fn test_rejects_garbage_at_the_first_stage() {
    let result = decode_packed_url("not base64 at all!!!");

    assert!(matches!(result, Err(Error::Decode(_))));
}

#[test]
fn test_rejects_garbage_at_the_second_stage() {
    // outer layer decodes fine, the inner string is not base64
    let packed = STANDARD.encode("@@@@");

    let result = decode_packed_url(&packed);

    assert!(matches!(result, Err(Error::Decode(_))));
}
