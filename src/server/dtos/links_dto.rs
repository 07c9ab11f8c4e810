use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamQuality {
    #[default]
    Unknown,
    P360,
    P480,
    P720,
    P1080,
    P2160,
}

/// one playable link, the final output unit of a resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamLink {
    pub source: String,
    pub url: String,
    pub referer: String,
    /// true when the url points at a segmented playlist rather than a
    /// progressive file
    pub is_playlist: bool,
    #[serde(default)]
    pub quality: StreamQuality,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleTrack {
    pub url: String,
    pub lang: String,
}

/// aggregate of one pipeline run, both sequences keep document order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolvedLinks {
    pub streams: Vec<StreamLink>,
    pub subtitles: Vec<SubtitleTrack>,
}
