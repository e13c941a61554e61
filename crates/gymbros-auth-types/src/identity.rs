//! Gateway-injected identity headers extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use gymbros_domain::id::UserId;
use gymbros_domain::role::Role;

/// Caller identity injected by the gateway via `x-gymbros-user-id` and
/// `x-gymbros-user-role` headers.
///
/// Returns 401 if either header is absent or malformed (non-UUID id,
/// unknown role string). Role enforcement (403) is done by handlers after
/// extraction — this type carries the role as an explicit value rather
/// than exposing ambient "is admin" context.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

impl Identity {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self {
            user_id: UserId(user_id),
            role,
        }
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = parts
            .headers
            .get("x-gymbros-user-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<Uuid>().ok());

        let role = parts
            .headers
            .get("x-gymbros-user-role")
            .and_then(|v| v.to_str().ok())
            .and_then(Role::from_wire);

        async move {
            let user_id = user_id.ok_or(StatusCode::UNAUTHORIZED)?;
            let role = role.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self::new(user_id, role))
        }
    }
}
