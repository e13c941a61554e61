use anyhow::Context as _;
use chrono::{DateTime, Utc};
use tonic::transport::Channel;

use gymbros_domain::id::UserId;
use gymbros_proto::membership::{
    CheckMembershipRequest, membership_service_client::MembershipServiceClient,
};

use crate::domain::repository::MembershipGatePort;
use crate::error::BookingsServiceError;

/// gRPC client implementing `MembershipGatePort` via
/// `membership.MembershipService`.
#[derive(Clone)]
pub struct GrpcMembershipClient {
    client: MembershipServiceClient<Channel>,
}

impl GrpcMembershipClient {
    pub async fn connect(url: &str) -> Result<Self, BookingsServiceError> {
        let client = MembershipServiceClient::connect(url.to_owned())
            .await
            .context("connect to memberships gRPC")?;
        Ok(Self { client })
    }

    /// Create a client with lazy connection (connects on first RPC call).
    /// Useful for tests where the memberships service may not be running.
    pub fn lazy(url: &str) -> Self {
        let channel = Channel::from_shared(url.to_owned())
            .expect("valid URI")
            .connect_lazy();
        Self {
            client: MembershipServiceClient::new(channel),
        }
    }
}

impl MembershipGatePort for GrpcMembershipClient {
    async fn usable_at(
        &self,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> Result<bool, BookingsServiceError> {
        let resp = self
            .client
            .clone()
            .check_membership(CheckMembershipRequest {
                user_id: user_id.to_string(),
                at: at.to_rfc3339(),
            })
            .await
            .context("gRPC CheckMembership")?;
        Ok(resp.into_inner().usable)
    }
}
