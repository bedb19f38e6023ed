use trivia_api::db;
use trivia_api::server::app::run_server;
use trivia_api::settings::Settings;
use trivia_api::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let settings = Settings::load()?;
    let pool = db::establish_connection(&settings.database_path).await?;
    db::run_migrations(&pool).await?;

    run_server(pool, &settings.socket_addr()).await
}
