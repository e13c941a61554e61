use chrono::{DateTime, Utc};
use tonic::{Request, Response, Status};
use uuid::Uuid;

use gymbros_domain::id::UserId;
use gymbros_proto::membership::{
    CheckMembershipRequest, CheckMembershipResponse,
    membership_service_server::MembershipService,
};

use crate::state::AppState;
use crate::usecase::membership::CheckMembershipUseCase;

#[derive(Clone)]
pub struct MembershipsGrpcServer {
    pub state: AppState,
}

#[tonic::async_trait]
impl MembershipService for MembershipsGrpcServer {
    async fn check_membership(
        &self,
        request: Request<CheckMembershipRequest>,
    ) -> Result<Response<CheckMembershipResponse>, Status> {
        let req = request.into_inner();
        let user_id = req
            .user_id
            .parse::<Uuid>()
            .map_err(|_| Status::invalid_argument("invalid user_id"))?;
        let at = if req.at.is_empty() {
            Utc::now()
        } else {
            DateTime::parse_from_rfc3339(&req.at)
                .map_err(|_| Status::invalid_argument("invalid at timestamp"))?
                .with_timezone(&Utc)
        };

        let uc = CheckMembershipUseCase {
            memberships: self.state.membership_repo(),
        };
        let end_date = uc
            .execute(UserId(user_id), at)
            .await
            .map_err(|e| Status::internal(e.to_string()))?;

        Ok(Response::new(CheckMembershipResponse {
            usable: end_date.is_some(),
            end_date: end_date.map(|d| d.to_rfc3339()).unwrap_or_default(),
        }))
    }
}
