//! Content categories
//!
//! Upstream sources label scenes with free-form section identifiers
//! (`advisory-nudity`, `gore`, `language`, ...). These are folded into a
//! closed set of categories through [`SECTION_IDENTIFIERS`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Content warning category
///
/// Wire names are lower-case. Any unrecognised name deserializes as
/// [`ContentType::Unknown`] so that one bad label never rejects a source.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Nudity,
    Violence,
    Profanity,
    Substances,
    Frightening,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Section identifiers recognised for each category
pub const SECTION_IDENTIFIERS: &[(ContentType, &[&str])] = &[
    (ContentType::Nudity, &["advisory-nudity", "nudity", "sex"]),
    (ContentType::Violence, &["advisory-violence", "violence", "gore"]),
    (ContentType::Profanity, &["advisory-profanity", "profanity", "language"]),
    (
        ContentType::Substances,
        &["advisory-alcohol", "alcohol", "drugs", "smoking"],
    ),
    (
        ContentType::Frightening,
        &["advisory-frightening", "frightening", "intense"],
    ),
];

impl ContentType {
    /// The five real categories, excluding `Unknown`
    pub const KNOWN: [ContentType; 5] = [
        ContentType::Nudity,
        ContentType::Violence,
        ContentType::Profanity,
        ContentType::Substances,
        ContentType::Frightening,
    ];

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Nudity => "nudity",
            ContentType::Violence => "violence",
            ContentType::Profanity => "profanity",
            ContentType::Substances => "substances",
            ContentType::Frightening => "frightening",
            ContentType::Unknown => "unknown",
        }
    }

    /// Map an upstream section identifier onto a category (case-insensitive)
    pub fn from_section_id(id: &str) -> Option<ContentType> {
        let id = id.trim().to_ascii_lowercase();
        SECTION_IDENTIFIERS
            .iter()
            .find(|(_, ids)| ids.contains(&id.as_str()))
            .map(|(content_type, _)| *content_type)
    }

    pub fn is_known(&self) -> bool {
        *self != ContentType::Unknown
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nudity" => Ok(ContentType::Nudity),
            "violence" => Ok(ContentType::Violence),
            "profanity" => Ok(ContentType::Profanity),
            "substances" => Ok(ContentType::Substances),
            "frightening" => Ok(ContentType::Frightening),
            "unknown" => Ok(ContentType::Unknown),
            other => Err(crate::Error::InvalidInput(format!(
                "unknown content type: {}",
                other
            ))),
        }
    }
}
