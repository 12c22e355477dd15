use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::constants::{
    AUDIO_EXTENSIONS, DOCUMENT_EXTENSIONS, IMAGE_EXTENSIONS, VIDEO_EXTENSIONS,
};

/// Named, built-in extension tables that can be unioned into the criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Documents,
    Videos,
    Audio,
    Images,
}

impl Preset {
    /// Every preset, in the order `--media` applies them
    pub const ALL: [Preset; 4] = [Preset::Audio, Preset::Images, Preset::Documents, Preset::Videos];

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Preset::Documents => DOCUMENT_EXTENSIONS,
            Preset::Videos => VIDEO_EXTENSIONS,
            Preset::Audio => AUDIO_EXTENSIONS,
            Preset::Images => IMAGE_EXTENSIONS,
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Preset::Documents => write!(f, "documents"),
            Preset::Videos => write!(f, "videos"),
            Preset::Audio => write!(f, "audio"),
            Preset::Images => write!(f, "images"),
        }
    }
}
