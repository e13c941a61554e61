use sea_orm::Database;
use tracing::info;

use gymbros_bookings::config::BookingsConfig;
use gymbros_bookings::infra::grpc::GrpcMembershipClient;
use gymbros_bookings::router::build_router;
use gymbros_bookings::state::AppState;

#[tokio::main]
async fn main() {
    gymbros_core::tracing::init_tracing();

    let config = BookingsConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let membership_client = GrpcMembershipClient::connect(&config.memberships_grpc_url)
        .await
        .expect("failed to connect to memberships gRPC");

    let state = AppState {
        db,
        membership_client,
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.bookings_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("bookings service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
