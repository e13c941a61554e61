/// Bookings service configuration loaded from environment variables.
#[derive(Debug)]
pub struct BookingsConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3210). Env var: `BOOKINGS_PORT`.
    pub bookings_port: u16,
    /// gRPC endpoint for the memberships service (e.g. "http://memberships:50061").
    pub memberships_grpc_url: String,
}

impl BookingsConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            bookings_port: std::env::var("BOOKINGS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3210),
            memberships_grpc_url: std::env::var("MEMBERSHIPS_GRPC_URL")
                .expect("MEMBERSHIPS_GRPC_URL"),
        }
    }
}
