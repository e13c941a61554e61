use sea_orm::DatabaseConnection;

use crate::config::MembershipsConfig;
use crate::infra::db::{DbMembershipRepository, DbPlanRepository, DbTierRepository};
use crate::infra::stripe::StripeClient;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub stripe: StripeClient,
    pub config: MembershipsConfig,
}

impl AppState {
    pub fn tier_repo(&self) -> DbTierRepository {
        DbTierRepository {
            db: self.db.clone(),
        }
    }

    pub fn plan_repo(&self) -> DbPlanRepository {
        DbPlanRepository {
            db: self.db.clone(),
        }
    }

    pub fn membership_repo(&self) -> DbMembershipRepository {
        DbMembershipRepository {
            db: self.db.clone(),
        }
    }

    pub fn payment_provider(&self) -> StripeClient {
        self.stripe.clone()
    }
}
