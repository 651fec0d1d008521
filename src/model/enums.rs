use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Tender status (fixed ordered bid-process enumeration)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Status {
    #[default]
    Offer,
    Round1,
    Round2,
    Round3,
    Round4,
    Bafo,
    ContractSigned,
    Won,
    Lost,
}

impl Status {
    /// All statuses in bid-process order, used for filter cycling and the
    /// pipeline funnel.
    pub const ALL: [Status; 9] = [
        Self::Offer,
        Self::Round1,
        Self::Round2,
        Self::Round3,
        Self::Round4,
        Self::Bafo,
        Self::ContractSigned,
        Self::Won,
        Self::Lost,
    ];

    /// Wire string as the backend stores it.
    pub fn label(self) -> &'static str {
        match self {
            Self::Offer => "Offer",
            Self::Round1 => "Round 1",
            Self::Round2 => "Round 2",
            Self::Round3 => "Round 3",
            Self::Round4 => "Round 4",
            Self::Bafo => "BAFO",
            Self::ContractSigned => "Contract Signed",
            Self::Won => "Won",
            Self::Lost => "Lost",
        }
    }

    /// Parse a status string leniently.  Accepts the backend's canonical
    /// forms plus common shorthands (`"round1"`, `"contract_signed"`, …).
    pub fn from_str_loose(s: &str) -> Self {
        let lower = s.to_ascii_lowercase();
        match lower.trim() {
            "round 1" | "round1" | "r1" => Self::Round1,
            "round 2" | "round2" | "r2" => Self::Round2,
            "round 3" | "round3" | "r3" => Self::Round3,
            "round 4" | "round4" | "r4" => Self::Round4,
            "bafo" => Self::Bafo,
            "contract signed" | "contract_signed" | "signed" => Self::ContractSigned,
            "won" => Self::Won,
            "lost" => Self::Lost,
            _ => Self::Offer, // offer and anything unrecognized
        }
    }

    /// Decorative flag for terminal statuses, shown next to the row label.
    pub fn flag(self) -> Option<&'static str> {
        match self {
            Self::Won => Some("●"),
            Self::Lost => Some("●"),
            Self::ContractSigned => Some("◆"),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Status {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

/// Custom deserializer so any status string variant the backend has ever
/// emitted maps onto the fixed enumeration.
impl<'de> Deserialize<'de> for Status {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Status::from_str_loose(&s))
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    High = 0,
    #[default]
    Medium = 1,
    Low = 2,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Self::High, Self::Medium, Self::Low];

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    pub fn from_str_loose(s: &str) -> Self {
        let lower = s.to_ascii_lowercase();
        match lower.trim() {
            "high" | "hi" => Self::High,
            "low" => Self::Low,
            _ => Self::Medium,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Priority {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Priority::from_str_loose(&s))
    }
}
