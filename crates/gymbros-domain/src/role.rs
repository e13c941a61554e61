//! User role types.

use serde::{Deserialize, Serialize};

/// Account role as stored on the profile.
///
/// Wire format: the literal strings `"Member"`, `"PT"`, `"Staff"`, `"Admin"`
/// (legacy casing preserved from the profile table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Member,
    #[serde(rename = "PT")]
    Trainer,
    Staff,
    Admin,
}

impl Role {
    /// Parse from the wire string. Returns `None` for unknown values.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "Member" => Some(Self::Member),
            "PT" => Some(Self::Trainer),
            "Staff" => Some(Self::Staff),
            "Admin" => Some(Self::Admin),
            _ => None,
        }
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Member => "Member",
            Self::Trainer => "PT",
            Self::Staff => "Staff",
            Self::Admin => "Admin",
        }
    }

    pub fn is_trainer(self) -> bool {
        matches!(self, Self::Trainer)
    }

    /// Staff-level access: front desk, class management.
    pub fn is_staff(self) -> bool {
        matches!(self, Self::Staff | Self::Admin)
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}
