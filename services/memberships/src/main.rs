use sea_orm::Database;
use tracing::info;

use gymbros_proto::membership::membership_service_server::MembershipServiceServer;

use gymbros_memberships::config::MembershipsConfig;
use gymbros_memberships::grpc_server::MembershipsGrpcServer;
use gymbros_memberships::infra::stripe::StripeClient;
use gymbros_memberships::router::build_router;
use gymbros_memberships::state::AppState;

#[tokio::main]
async fn main() {
    gymbros_core::tracing::init_tracing();

    let config = MembershipsConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let stripe = StripeClient::new(config.stripe_secret_key.clone());
    let state = AppState {
        db,
        stripe,
        config: config.clone(),
    };

    // Spawn the gating gRPC server consumed by the bookings service.
    let grpc_state = state.clone();
    let grpc_addr = format!("0.0.0.0:{}", config.memberships_grpc_port);
    tokio::spawn(async move {
        let server = MembershipsGrpcServer { state: grpc_state };
        info!("memberships gRPC server listening on {grpc_addr}");
        tonic::transport::Server::builder()
            .add_service(MembershipServiceServer::new(server))
            .serve(grpc_addr.parse().expect("invalid gRPC address"))
            .await
            .expect("gRPC server error");
    });

    // HTTP server
    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.memberships_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("memberships service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
