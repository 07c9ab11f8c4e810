pub mod decode_utils;
pub mod scrape_utils;
