use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

const MIB: u64 = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    Image,
    Video,
    Audio,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 3] = [
        AssetCategory::Image,
        AssetCategory::Video,
        AssetCategory::Audio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetCategory::Image => "image",
            AssetCategory::Video => "video",
            AssetCategory::Audio => "audio",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown asset category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for AssetCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(AssetCategory::Image),
            "video" => Ok(AssetCategory::Video),
            "audio" => Ok(AssetCategory::Audio),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// Content types and size bound accepted for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRules {
    pub allowed_content_types: &'static [&'static str],
    pub max_size_bytes: u64,
}

impl CategoryRules {
    pub fn allows_content_type(&self, content_type: &str) -> bool {
        self.allowed_content_types.contains(&content_type)
    }
}

/// Static table of per-category upload limits. The table is fixed at
/// compile time so every category always has exactly one rule set.
pub struct AssetTypePolicy;

impl AssetTypePolicy {
    const IMAGE: CategoryRules = CategoryRules {
        allowed_content_types: &["image/jpeg", "image/png", "image/gif"],
        max_size_bytes: 10 * MIB,
    };

    const VIDEO: CategoryRules = CategoryRules {
        allowed_content_types: &["video/mp4", "video/quicktime"],
        max_size_bytes: 100 * MIB,
    };

    const AUDIO: CategoryRules = CategoryRules {
        allowed_content_types: &["audio/mpeg", "audio/wav", "audio/mp4"],
        max_size_bytes: 50 * MIB,
    };

    pub fn for_category(category: AssetCategory) -> CategoryRules {
        match category {
            AssetCategory::Image => Self::IMAGE,
            AssetCategory::Video => Self::VIDEO,
            AssetCategory::Audio => Self::AUDIO,
        }
    }

    /// Upper bound on any single asset; request bodies are capped at this size.
    pub fn largest_max_size_bytes() -> u64 {
        AssetCategory::ALL
            .iter()
            .map(|c| Self::for_category(*c).max_size_bytes)
            .max()
            .unwrap_or(0)
    }

    /// Resolves rules for a raw category name coming from a request.
    pub fn for_category_name(name: &str) -> Result<(AssetCategory, CategoryRules), UnknownCategory> {
        let category = AssetCategory::from_str(name)?;
        Ok((category, Self::for_category(category)))
    }
}
