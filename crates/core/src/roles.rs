//! Role and status enums shared between the database and API layers.
//!
//! Each enum maps to a PostgreSQL enum type of the same (snake_case) name,
//! created in the initial migrations. Serde and sqlx both use the
//! snake_case wire form so JSON payloads and database values agree.

use serde::{Deserialize, Serialize};

/// Role a collaborator holds on a project.
///
/// Roles are descriptive only -- authorization is membership-based
/// (creator or active collaborator), not role-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "collaborator_role", rename_all = "snake_case")]
pub enum Role {
    /// Default role granted when an invitation is accepted.
    #[default]
    Artist,
    Producer,
    Songwriter,
    Engineer,
    MixingEngineer,
    MasteringEngineer,
    Management,
    Label,
}

/// Lifecycle status of a project or track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "work_status", rename_all = "snake_case")]
pub enum WorkStatus {
    #[default]
    Doing,
    Done,
}

/// Membership status of a collaborator row.
///
/// `Inactive` is a reserved value: the schema defines it but no code path
/// assigns it. Removal always transitions Active -> Removed, and re-adding
/// reactivates the existing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "collaborator_status", rename_all = "snake_case")]
pub enum CollaboratorStatus {
    Active,
    Inactive,
    Removed,
}

/// Invitation lifecycle: `Pending` transitions once into one of the three
/// terminal states and never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "invitation_status", rename_all = "snake_case")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
    Cancelled,
}

/// Status of a hit-list (task) item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "hit_list_status", rename_all = "snake_case")]
pub enum HitListStatus {
    #[default]
    Todo,
    InProgress,
    Complete,
}

/// Priority of a hit-list item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "hit_list_priority", rename_all = "snake_case")]
pub enum HitListPriority {
    Low,
    #[default]
    Medium,
    High,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_form_is_snake_case() {
        let json = serde_json::to_string(&Role::MixingEngineer).unwrap();
        assert_eq!(json, "\"mixing_engineer\"");

        let parsed: Role = serde_json::from_str("\"mastering_engineer\"").unwrap();
        assert_eq!(parsed, Role::MasteringEngineer);
    }

    #[test]
    fn test_default_role_is_artist() {
        assert_eq!(Role::default(), Role::Artist);
    }

    #[test]
    fn test_invitation_status_round_trip() {
        for status in [
            InvitationStatus::Pending,
            InvitationStatus::Accepted,
            InvitationStatus::Declined,
            InvitationStatus::Cancelled,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            let back: InvitationStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }
}
