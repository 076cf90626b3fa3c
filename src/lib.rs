mod config;
mod data_formats;
mod db_helpers;
mod errors;
mod handlers;
mod markdown;
mod models;
mod pagination;
mod sidebar;
mod visitor;

use anyhow::Context;
pub use anyhow::Result;
use axum::http::StatusCode;
use axum::{routing::*, Extension, Json, Router};
pub use config::Config;
pub use data_formats::*;
pub use db_helpers::*;
pub use errors::{FieldErrors, RequestError};
use handlers::*;
pub use markdown::render_markdown;
pub use models::*;
pub use pagination::{Page, PAGE_SIZE};
pub use sidebar::{get_sidebars, SideBarContent};
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::{
    net::{SocketAddr, TcpListener},
    sync::Arc,
};
use tower_http::trace::TraceLayer;
pub use visitor::{Visitor, VISITOR_COOKIE};

pub type JsonResponse<T> = (StatusCode, Json<T>);

pub async fn run_app(app: Router, address: SocketAddr, db: SqlitePool) -> Result<()> {
    let app = app.layer(Extension(Arc::new(db)));
    tracing::info!(%address, "server started");
    axum::Server::bind(&address)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

pub async fn init_db(db_url: &str) -> Result<SqlitePool> {
    if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
        tracing::info!(db_url, "creating database");
        Sqlite::create_database(db_url)
            .await
            .context("Failed to create database")?;
    } else {
        tracing::debug!(db_url, "database already exists");
    }
    let pool = SqlitePool::connect(db_url).await?;
    tracing::info!("running migrations");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("migrations completed");
    Ok(pool)
}

pub fn get_random_free_port() -> Result<(u16, SocketAddr)> {
    let listener = TcpListener::bind("127.0.0.1:0").context("Could not bind a free port")?;
    let addr = listener.local_addr().context("Could not get a free port")?;
    Ok((addr.port(), addr))
}

pub fn make_router() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/category/:category_id/", get(category_posts))
        .route("/tag/:tag_id/", get(tag_posts))
        .route("/post/:file/", get(post_detail))
        .route("/links/", get(links))
        .route("/search/", get(search))
        .route("/author/:owner_id", get(author_posts))
        .route("/comment/", post(add_comment))
        .route("/check_health", get(alive))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
}
