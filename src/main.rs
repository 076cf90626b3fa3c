use myblog::{init_db, make_router, run_app, Config, Result};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("myblog=info,tower_http=debug")),
        )
        .init();

    let result: Result<()> = async {
        let config = Config::from_env()?;
        let db = init_db(&config.database_url).await?;
        run_app(make_router(), config.bind_addr, db).await
    }
    .await;
    if let Err(error) = result {
        tracing::error!("{:#}", error);
        std::process::exit(1);
    }
}
