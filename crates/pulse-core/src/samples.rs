//! Preset example texts offered next to direct entry.

use serde::{Deserialize, Serialize};

/// Where the analyzed text comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SampleSource {
    #[default]
    DirectInput,
    SampleTweet1,
    SampleTweet2,
}

impl SampleSource {
    pub const ALL: [SampleSource; 3] = [
        SampleSource::DirectInput,
        SampleSource::SampleTweet1,
        SampleSource::SampleTweet2,
    ];

    /// Parse from the slug used in URLs and CLI flags. Unknown slugs yield `None`.
    pub fn from_slug(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "direct-input" | "direct" | "" => Some(Self::DirectInput),
            "sample-tweet-1" | "tweet-1" | "1" => Some(Self::SampleTweet1),
            "sample-tweet-2" | "tweet-2" | "2" => Some(Self::SampleTweet2),
            _ => None,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Self::DirectInput => "direct-input",
            Self::SampleTweet1 => "sample-tweet-1",
            Self::SampleTweet2 => "sample-tweet-2",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::DirectInput => "Direct Input",
            Self::SampleTweet1 => "Sample Tweet 1",
            Self::SampleTweet2 => "Sample Tweet 2",
        }
    }

    /// Preset text, or `None` for direct entry.
    pub fn text(&self) -> Option<&'static str> {
        match self {
            Self::DirectInput => None,
            Self::SampleTweet1 => Some(
                "I absolutely love the new features in JioCinema! The streaming quality is \
                 fantastic and the app is so smooth. Kudos to the team!",
            ),
            Self::SampleTweet2 => Some(
                "Really frustrated with the server downtime yesterday. I couldn't watch the \
                 match and the support team was unresponsive. #Angry",
            ),
        }
    }
}
