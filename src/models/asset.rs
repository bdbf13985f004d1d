//! Asset kinds and normalized asset records.

use serde::{Deserialize, Serialize};

/// Category of artwork or media an asset belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Title,
    Snap,
    #[serde(rename = "boxfront")]
    BoxFront,
    #[serde(rename = "boxback")]
    BoxBack,
    #[serde(rename = "3dbox")]
    Box3d,
    Cartridge,
    Fanart,
    Banner,
    #[serde(rename = "clearlogo")]
    ClearLogo,
    Flyer,
    Map,
    Manual,
    Trailer,
}

impl AssetKind {
    /// Every kind, in display order.
    pub const ALL: [AssetKind; 13] = [
        Self::Title,
        Self::Snap,
        Self::BoxFront,
        Self::BoxBack,
        Self::Box3d,
        Self::Cartridge,
        Self::Fanart,
        Self::Banner,
        Self::ClearLogo,
        Self::Flyer,
        Self::Map,
        Self::Manual,
        Self::Trailer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Snap => "snap",
            Self::BoxFront => "boxfront",
            Self::BoxBack => "boxback",
            Self::Box3d => "3dbox",
            Self::Cartridge => "cartridge",
            Self::Fanart => "fanart",
            Self::Banner => "banner",
            Self::ClearLogo => "clearlogo",
            Self::Flyer => "flyer",
            Self::Map => "map",
            Self::Manual => "manual",
            Self::Trailer => "trailer",
        }
    }

    /// Video listings come from a different backend than images.
    pub fn is_video(&self) -> bool {
        matches!(self, Self::Trailer)
    }

    /// Word appended to the search term when querying for this kind.
    ///
    /// Only a few kinds need a friendlier word; the rest search by their id.
    pub fn search_term(&self) -> &'static str {
        match self {
            Self::Fanart => "wallpaper",
            Self::Snap => "screenshot",
            Self::Title => "title screen",
            other => other.as_str(),
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == id)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
                format!(
                    "Invalid asset kind '{}'. Valid options: {}",
                    s,
                    known.join(", ")
                )
            })
    }
}

/// A single search result mapped into the stable asset schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedAsset {
    pub asset_kind: AssetKind,
    pub display_name: String,
    /// Absolute thumbnail URL.
    pub thumb_url: String,
    /// Absolute full-resolution (or playback) URL.
    pub full_url: String,
}
