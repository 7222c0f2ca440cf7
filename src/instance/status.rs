//! Instance lifecycle status.
//!
//! Repository instances move through an ordered lifecycle. The change stream
//! delivers the status as a bare string, so the mapping back to the enum must
//! be total: any name outside the known table collapses to
//! [`InstanceStatus::Unknown`] rather than failing, so a single odd instance
//! never blocks a batch.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Ordered lifecycle status of a repository instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InstanceStatus {
    /// Status not recognized or not supplied.
    Unknown,
    /// Draft, still being authored.
    Draft,
    /// Prepared for review.
    Prepared,
    /// Proposed for approval.
    Proposed,
    /// Approved but not yet in use.
    Approved,
    /// Active and in use.
    Active,
    /// Soft-deleted.
    Deleted,
}

impl InstanceStatus {
    /// Maps a repository status name to the enum. The table is closed and
    /// total: every name outside it maps to [`InstanceStatus::Unknown`].
    pub fn from_status_name(name: &str) -> Self {
        match name {
            "Unknown" => InstanceStatus::Unknown,
            "Draft" => InstanceStatus::Draft,
            "Prepared" => InstanceStatus::Prepared,
            "Proposed" => InstanceStatus::Proposed,
            "Approved" => InstanceStatus::Approved,
            "Active" => InstanceStatus::Active,
            "Deleted" => InstanceStatus::Deleted,
            other => {
                debug!(status = other, "unrecognized instance status, mapping to Unknown");
                InstanceStatus::Unknown
            }
        }
    }

    /// Repository name for this status, the inverse of [`from_status_name`]
    /// for every variant.
    ///
    /// [`from_status_name`]: InstanceStatus::from_status_name
    pub fn status_name(&self) -> &'static str {
        match self {
            InstanceStatus::Unknown => "Unknown",
            InstanceStatus::Draft => "Draft",
            InstanceStatus::Prepared => "Prepared",
            InstanceStatus::Proposed => "Proposed",
            InstanceStatus::Approved => "Approved",
            InstanceStatus::Active => "Active",
            InstanceStatus::Deleted => "Deleted",
        }
    }
}

impl Default for InstanceStatus {
    fn default() -> Self {
        InstanceStatus::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names_map_exactly() {
        assert_eq!(InstanceStatus::from_status_name("Unknown"), InstanceStatus::Unknown);
        assert_eq!(InstanceStatus::from_status_name("Draft"), InstanceStatus::Draft);
        assert_eq!(InstanceStatus::from_status_name("Prepared"), InstanceStatus::Prepared);
        assert_eq!(InstanceStatus::from_status_name("Proposed"), InstanceStatus::Proposed);
        assert_eq!(InstanceStatus::from_status_name("Approved"), InstanceStatus::Approved);
        assert_eq!(InstanceStatus::from_status_name("Active"), InstanceStatus::Active);
        assert_eq!(InstanceStatus::from_status_name("Deleted"), InstanceStatus::Deleted);
    }

    #[test]
    fn test_unrecognized_names_map_to_unknown() {
        assert_eq!(InstanceStatus::from_status_name(""), InstanceStatus::Unknown);
        assert_eq!(InstanceStatus::from_status_name("active"), InstanceStatus::Unknown);
        assert_eq!(InstanceStatus::from_status_name("ACTIVE"), InstanceStatus::Unknown);
        assert_eq!(InstanceStatus::from_status_name("Obsolete"), InstanceStatus::Unknown);
        assert_eq!(InstanceStatus::from_status_name("DeletedX"), InstanceStatus::Unknown);
    }

    #[test]
    fn test_round_trip_names() {
        for status in [
            InstanceStatus::Unknown,
            InstanceStatus::Draft,
            InstanceStatus::Prepared,
            InstanceStatus::Proposed,
            InstanceStatus::Approved,
            InstanceStatus::Active,
            InstanceStatus::Deleted,
        ] {
            assert_eq!(InstanceStatus::from_status_name(status.status_name()), status);
        }
    }

    #[test]
    fn test_lifecycle_ordering() {
        assert!(InstanceStatus::Draft < InstanceStatus::Active);
        assert!(InstanceStatus::Active < InstanceStatus::Deleted);
    }
}
