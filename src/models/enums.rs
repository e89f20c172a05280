use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(UrgencyLevel {
    High => "high",
    Medium => "medium",
    Low => "low",
});

impl UrgencyLevel {
    /// Sort rank for the review queue: high before medium before low.
    pub fn rank(&self) -> i64 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }
}

str_enum!(QueryStatus {
    PendingReview => "pending_review",
    Approved => "approved",
    NeedsInfo => "needs_info",
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn urgency_level_round_trip() {
        for (variant, s) in [
            (UrgencyLevel::High, "high"),
            (UrgencyLevel::Medium, "medium"),
            (UrgencyLevel::Low, "low"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(UrgencyLevel::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn query_status_round_trip() {
        for (variant, s) in [
            (QueryStatus::PendingReview, "pending_review"),
            (QueryStatus::Approved, "approved"),
            (QueryStatus::NeedsInfo, "needs_info"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(QueryStatus::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn urgency_rank_orders_high_first() {
        assert!(UrgencyLevel::High.rank() < UrgencyLevel::Medium.rank());
        assert!(UrgencyLevel::Medium.rank() < UrgencyLevel::Low.rank());
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(UrgencyLevel::from_str("critical").is_err());
        assert!(QueryStatus::from_str("answered").is_err());
        assert!(QueryStatus::from_str("").is_err());
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&QueryStatus::PendingReview).unwrap();
        assert_eq!(json, "\"pending_review\"");
        let parsed: UrgencyLevel = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(parsed, UrgencyLevel::Medium);
    }
}
