//! Mock gateway identity for integration tests.
//!
//! Services behind the gateway receive `x-gymbros-user-id` +
//! `x-gymbros-user-role` headers injected by the gateway. In tests,
//! `MockIdentity` produces these headers directly so no real gateway or
//! token verification is needed.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

use gymbros_domain::id::UserId;
use gymbros_domain::role::Role;

/// Configurable identity injected into test requests.
pub struct MockIdentity {
    pub user_id: UserId,
    pub role: Role,
}

impl MockIdentity {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// A fresh member identity, the common case.
    pub fn member() -> Self {
        Self::new(UserId(Uuid::new_v4()), Role::Member)
    }

    pub fn trainer() -> Self {
        Self::new(UserId(Uuid::new_v4()), Role::Trainer)
    }

    pub fn staff() -> Self {
        Self::new(UserId(Uuid::new_v4()), Role::Staff)
    }

    pub fn admin() -> Self {
        Self::new(UserId(Uuid::new_v4()), Role::Admin)
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static("x-gymbros-user-id"),
            HeaderValue::from_str(&self.user_id.to_string()).unwrap(),
        );
        map.insert(
            HeaderName::from_static("x-gymbros-user-role"),
            HeaderValue::from_static(self.role.as_wire()),
        );
        map
    }
}
