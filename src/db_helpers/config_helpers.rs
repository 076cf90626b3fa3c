use sqlx::{Sqlite, SqlitePool};
use validator::Validate;

use crate::data_formats::request::{NewLink, NewSideBar};
use crate::errors::RequestError;
use crate::models::{Link, Owner, SideBar, SideBarStatus, SoftDelete, Status};

// ----------------- SideBar Queries -----------------

/// Sidebars currently shown, in the order they were added.
pub async fn get_sidebars_in_db(pool: &SqlitePool) -> Result<Vec<SideBar>, RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, SideBar>(
        r#"
        SELECT id, name, display_type, content, status, owner_id, created_time
        FROM sidebars
        WHERE status = $1
        ORDER BY id
        "#,
    )
    .bind(SideBarStatus::VISIBLE)
    .fetch_all(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(result)
}

pub async fn create_sidebar_in_db(
    pool: &SqlitePool,
    owner: Owner,
    sidebar: NewSideBar,
) -> Result<SideBar, RequestError> {
    sidebar.validate()?;
    let NewSideBar {
        name,
        display_type,
        content,
        status,
    } = sidebar;

    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, SideBar>(
        r#"
        INSERT INTO sidebars (name, display_type, content, status, owner_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, display_type, content, status, owner_id, created_time
        "#,
    )
    .bind(name)
    .bind(display_type)
    .bind(content)
    .bind(status)
    .bind(owner.id)
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(result)
}

pub async fn set_sidebar_status_in_db(
    pool: &SqlitePool,
    owner: Owner,
    id: i64,
    status: SideBarStatus,
) -> Result<(), RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query("UPDATE sidebars SET status = $1 WHERE id = $2 AND owner_id = $3")
        .bind(status)
        .bind(id)
        .bind(owner.id)
        .execute(&mut tx)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound("Sidebar not found"));
    }
    tx.commit().await?;
    Ok(())
}

// ----------------- Link Queries -----------------

/// Normal links, heaviest first.
pub async fn get_links_in_db(pool: &SqlitePool) -> Result<Vec<Link>, RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, Link>(
        r#"
        SELECT id, name, href, status, weight, owner_id, created_time
        FROM links
        WHERE status = $1
        ORDER BY weight DESC, id
        "#,
    )
    .bind(Status::VISIBLE)
    .fetch_all(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(result)
}

pub async fn create_link_in_db(
    pool: &SqlitePool,
    owner: Owner,
    link: NewLink,
) -> Result<Link, RequestError> {
    link.validate()?;
    let NewLink {
        name,
        href,
        status,
        weight,
    } = link;

    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, Link>(
        r#"
        INSERT INTO links (name, href, status, weight, owner_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, href, status, weight, owner_id, created_time
        "#,
    )
    .bind(name)
    .bind(href)
    .bind(status)
    .bind(weight)
    .bind(owner.id)
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(result)
}

pub async fn set_link_status_in_db(
    pool: &SqlitePool,
    owner: Owner,
    id: i64,
    status: Status,
) -> Result<(), RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query("UPDATE links SET status = $1 WHERE id = $2 AND owner_id = $3")
        .bind(status)
        .bind(id)
        .bind(owner.id)
        .execute(&mut tx)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound("Link not found"));
    }
    tx.commit().await?;
    Ok(())
}
