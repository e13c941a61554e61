//! Newtype wrappers for domain identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

uuid_id!(
    /// Identifies a user account (shared with the auth identity).
    UserId
);
uuid_id!(
    /// Identifies a scheduled gym class.
    ClassId
);
uuid_id!(
    /// Identifies a booking row.
    BookingId
);
uuid_id!(
    /// Identifies a membership tier (reference data).
    TierId
);
uuid_id!(
    /// Identifies a priced membership plan.
    PlanId
);
uuid_id!(
    /// Identifies a purchased user membership.
    MembershipId
);
