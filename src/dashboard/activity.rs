//! Recent Activity Feed
//!
//! Display-only list of recent portal events, rendered newest-first as
//! provided. The feed is a fixed set of sample entries; no live event
//! source feeds it.

use serde::{Deserialize, Serialize};

/// Review state attached to an activity entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityStatus {
    Pending,
    Approved,
    Completed,
    UnderReview,
    Rejected,
    Other,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Pending => "pending",
            ActivityStatus::Approved => "approved",
            ActivityStatus::Completed => "completed",
            ActivityStatus::UnderReview => "under-review",
            ActivityStatus::Rejected => "rejected",
            ActivityStatus::Other => "other",
        }
    }
}

/// One row of the recent-activity list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: u32,
    /// Event category, e.g. "Vehicle Registration".
    pub kind: String,
    pub description: String,
    /// Who triggered the event.
    pub actor: String,
    /// Human-readable age, e.g. "2 minutes ago".
    pub relative_time: String,
    pub status: ActivityStatus,
}

/// The sample feed shown on the dashboard, newest first.
pub fn sample_feed() -> Vec<ActivityEntry> {
    vec![
        ActivityEntry {
            id: 1,
            kind: "Vehicle Registration".to_string(),
            description: "New vehicle registration application submitted".to_string(),
            actor: "John Doe".to_string(),
            relative_time: "2 minutes ago".to_string(),
            status: ActivityStatus::Pending,
        },
        ActivityEntry {
            id: 2,
            kind: "License Application".to_string(),
            description: "Driver license application approved".to_string(),
            actor: "Jane Smith".to_string(),
            relative_time: "15 minutes ago".to_string(),
            status: ActivityStatus::Approved,
        },
        ActivityEntry {
            id: 3,
            kind: "User Registration".to_string(),
            description: "New user account created".to_string(),
            actor: "Mike Johnson".to_string(),
            relative_time: "1 hour ago".to_string(),
            status: ActivityStatus::Completed,
        },
        ActivityEntry {
            id: 4,
            kind: "Transport Route".to_string(),
            description: "Route schedule updated".to_string(),
            actor: "Admin".to_string(),
            relative_time: "2 hours ago".to_string(),
            status: ActivityStatus::Completed,
        },
        ActivityEntry {
            id: 5,
            kind: "Vehicle Inspection".to_string(),
            description: "Vehicle inspection report submitted".to_string(),
            actor: "Sarah Wilson".to_string(),
            relative_time: "3 hours ago".to_string(),
            status: ActivityStatus::UnderReview,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_feed_is_newest_first() {
        let feed = sample_feed();
        assert_eq!(feed.len(), 5);
        let ids: Vec<u32> = feed.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(feed[0].relative_time, "2 minutes ago");
    }

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&ActivityStatus::UnderReview).unwrap();
        assert_eq!(json, r#""under-review""#);

        let parsed: ActivityStatus = serde_json::from_str(r#""pending""#).unwrap();
        assert_eq!(parsed, ActivityStatus::Pending);
    }

    #[test]
    fn status_as_str_matches_wire_form() {
        for status in [
            ActivityStatus::Pending,
            ActivityStatus::Approved,
            ActivityStatus::Completed,
            ActivityStatus::UnderReview,
            ActivityStatus::Rejected,
            ActivityStatus::Other,
        ] {
            let wire = serde_json::to_string(&status).unwrap();
            assert_eq!(wire, format!("\"{}\"", status.as_str()));
        }
    }
}
