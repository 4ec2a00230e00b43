/// Topic and text type definitions
///
/// Both enums mirror the fixed path segments of the site's flow listings.
use crate::HarvestError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// A content category of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Develop,
    Admin,
    Design,
    Management,
    Marketing,
    Popsci,
}

impl Topic {
    /// Every topic, in the order a full harvest visits them
    pub const ALL: [Topic; 6] = [
        Topic::Develop,
        Topic::Admin,
        Topic::Design,
        Topic::Management,
        Topic::Marketing,
        Topic::Popsci,
    ];

    /// Returns the URL path segment for this topic
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Develop => "develop",
            Self::Admin => "admin",
            Self::Design => "design",
            Self::Management => "management",
            Self::Marketing => "marketing",
            Self::Popsci => "popsci",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = HarvestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .into_iter()
            .find(|topic| topic.as_str() == s)
            .ok_or_else(|| {
                HarvestError::InvalidArgument(format!(
                    "Topic \"{}\" not in {:?}",
                    s,
                    Topic::ALL.map(|t| t.as_str())
                ))
            })
    }
}

/// The kind of publication listed by a flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextType {
    Articles,
    News,
}

impl TextType {
    pub const ALL: [TextType; 2] = [TextType::Articles, TextType::News];

    /// Returns the URL path segment for this text type
    ///
    /// The same name is used as the stem of the exported CSV file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Articles => "articles",
            Self::News => "news",
        }
    }
}

impl fmt::Display for TextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextType {
    type Err = HarvestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TextType::ALL
            .into_iter()
            .find(|text_type| text_type.as_str() == s)
            .ok_or_else(|| {
                HarvestError::InvalidArgument(format!(
                    "Text type \"{}\" not in {:?}",
                    s,
                    TextType::ALL.map(|t| t.as_str())
                ))
            })
    }
}
