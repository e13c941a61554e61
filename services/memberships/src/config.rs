/// Memberships service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct MembershipsConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3220). Env var: `MEMBERSHIPS_PORT`.
    pub memberships_port: u16,
    /// TCP port for the gRPC gating server (default 50061).
    /// Env var: `MEMBERSHIPS_GRPC_PORT`.
    pub memberships_grpc_port: u16,
    /// Stripe secret API key (`sk_...`).
    pub stripe_secret_key: String,
    /// Stripe publishable key handed to the client (`pk_...`).
    pub stripe_publishable_key: String,
    /// Stripe webhook signing secret (`whsec_...`).
    pub stripe_webhook_secret: String,
    /// Payment currency code (default "vnd", which has no minor unit).
    pub currency: String,
}

impl MembershipsConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            memberships_port: std::env::var("MEMBERSHIPS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3220),
            memberships_grpc_port: std::env::var("MEMBERSHIPS_GRPC_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50061),
            stripe_secret_key: std::env::var("STRIPE_SECRET_KEY").expect("STRIPE_SECRET_KEY"),
            stripe_publishable_key: std::env::var("STRIPE_PUBLISHABLE_KEY")
                .expect("STRIPE_PUBLISHABLE_KEY"),
            stripe_webhook_secret: std::env::var("STRIPE_WEBHOOK_SECRET")
                .expect("STRIPE_WEBHOOK_SECRET"),
            currency: std::env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "vnd".to_owned()),
        }
    }
}
