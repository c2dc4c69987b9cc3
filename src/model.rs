//! Wire types for the recall API.
//!
//! These mirror the JSON shapes the directory backend serves. They are
//! library-side with no clap dependency; the CLI converts its own arg
//! strings via the `FromStr` impls here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Confidence level assigned to a recall signal by the backend.
///
/// Wire form is the upper-case token (`CONFIRMED`, ...). Parsing is
/// case-insensitive; the server is too for this field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfidenceLevel {
    Confirmed,
    Probable,
    Watch,
}

impl ConfidenceLevel {
    /// Upper-case token as sent on the wire.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Confirmed => "CONFIRMED",
            Self::Probable => "PROBABLE",
            Self::Watch => "WATCH",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl FromStr for ConfidenceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CONFIRMED" => Ok(Self::Confirmed),
            "PROBABLE" => Ok(Self::Probable),
            "WATCH" => Ok(Self::Watch),
            other => Err(format!(
                "unknown status '{other}' (expected CONFIRMED, PROBABLE, or WATCH)"
            )),
        }
    }
}

/// Region covered by the directory. Absence means "all regions".
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "US")]
    Us,
    #[serde(rename = "IN")]
    In,
}

impl Region {
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Us => "US",
            Self::In => "IN",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "US" => Ok(Self::Us),
            "IN" => Ok(Self::In),
            other => Err(format!("unknown region '{other}' (expected US or IN)")),
        }
    }
}

/// A single recall/safety-alert record. Read-only to this crate — the
/// backend owns ingestion, scoring, and dedup.
///
/// Timestamps stay as the backend's ISO strings; nothing here does date
/// math on them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recall {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub region: String,
    #[serde(default)]
    pub hazard_summary: Option<String>,
    #[serde(default)]
    pub official_action: Option<String>,
    pub confidence_level: ConfidenceLevel,
    #[serde(default)]
    pub signal_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub published_date: Option<String>,
    pub updated_at: String,
    pub created_at: String,
}

/// A user tracking target, matched by case-folded substring against recall
/// `brand`/`title`. Created and deleted via explicit actions; otherwise
/// immutable and owned by the remote service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WatchlistItem {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}
