use sea_orm::DatabaseConnection;

use crate::infra::db::{DbAccessLogRepository, DbBookingRepository, DbClassRepository};
use crate::infra::grpc::GrpcMembershipClient;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub membership_client: GrpcMembershipClient,
}

impl AppState {
    pub fn class_repo(&self) -> DbClassRepository {
        DbClassRepository {
            db: self.db.clone(),
        }
    }

    pub fn booking_repo(&self) -> DbBookingRepository {
        DbBookingRepository {
            db: self.db.clone(),
        }
    }

    pub fn access_log_repo(&self) -> DbAccessLogRepository {
        DbAccessLogRepository {
            db: self.db.clone(),
        }
    }

    pub fn membership_gate(&self) -> GrpcMembershipClient {
        self.membership_client.clone()
    }
}
