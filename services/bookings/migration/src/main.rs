use sea_orm_migration::prelude::*;

use gymbros_bookings_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
