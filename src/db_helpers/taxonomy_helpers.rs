use sqlx::{Sqlite, SqlitePool};
use validator::Validate;

use crate::data_formats::request::{NewCategory, NewTag};
use crate::errors::RequestError;
use crate::models::{Category, Owner, SoftDelete, Status, Tag};

/// Normal categories split by whether they belong in the top navigation.
#[derive(Debug, Clone, Default)]
pub struct Navs {
    pub nav: Vec<Category>,
    pub categories: Vec<Category>,
}

// ----------------- Category Queries -----------------

pub async fn get_navs_in_db(pool: &SqlitePool) -> Result<Navs, RequestError> {
    let mut tx = pool.begin().await?;
    let categories = sqlx::query_as::<Sqlite, Category>(
        r#"
        SELECT id, name, status, is_nav, owner_id, created_time
        FROM categories
        WHERE status = $1
        ORDER BY id
        "#,
    )
    .bind(Status::VISIBLE)
    .fetch_all(&mut tx)
    .await?;
    tx.commit().await?;

    let (nav, categories) = categories.into_iter().partition(|category| category.is_nav);
    Ok(Navs { nav, categories })
}

/// Looks up a category that is publicly visible. Deleted categories are
/// reported the same way as missing ones.
pub async fn get_category_in_db(pool: &SqlitePool, id: i64) -> Result<Category, RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, Category>(
        r#"
        SELECT id, name, status, is_nav, owner_id, created_time
        FROM categories
        WHERE id = $1 AND status = $2
        "#,
    )
    .bind(id)
    .bind(Status::VISIBLE)
    .fetch_optional(&mut tx)
    .await?;
    tx.commit().await?;
    result.ok_or(RequestError::NotFound("Category not found"))
}

pub async fn create_category_in_db(
    pool: &SqlitePool,
    owner: Owner,
    category: NewCategory,
) -> Result<Category, RequestError> {
    category.validate()?;
    let NewCategory {
        name,
        status,
        is_nav,
    } = category;

    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, Category>(
        r#"
        INSERT INTO categories (name, status, is_nav, owner_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, status, is_nav, owner_id, created_time
        "#,
    )
    .bind(name)
    .bind(status)
    .bind(is_nav)
    .bind(owner.id)
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;
    tracing::debug!(category_id = result.id, "category created");
    Ok(result)
}

pub async fn set_category_status_in_db(
    pool: &SqlitePool,
    owner: Owner,
    id: i64,
    status: Status,
) -> Result<(), RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query("UPDATE categories SET status = $1 WHERE id = $2 AND owner_id = $3")
        .bind(status)
        .bind(id)
        .bind(owner.id)
        .execute(&mut tx)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound("Category not found"));
    }
    tx.commit().await?;
    Ok(())
}

// ----------------- Tag Queries -----------------

/// Looks up a tag that is publicly visible.
pub async fn get_tag_in_db(pool: &SqlitePool, id: i64) -> Result<Tag, RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, Tag>(
        r#"
        SELECT id, name, status, owner_id, created_time
        FROM tags
        WHERE id = $1 AND status = $2
        "#,
    )
    .bind(id)
    .bind(Status::VISIBLE)
    .fetch_optional(&mut tx)
    .await?;
    tx.commit().await?;
    result.ok_or(RequestError::NotFound("Tag not found"))
}

pub async fn get_tags_for_post_in_db(
    pool: &SqlitePool,
    post_id: i64,
) -> Result<Vec<Tag>, RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, Tag>(
        r#"
        SELECT tags.id, tags.name, tags.status, tags.owner_id, tags.created_time
        FROM tags
            JOIN post_tags ON post_tags.tag_id = tags.id
        WHERE post_tags.post_id = $1 AND tags.status = $2
        ORDER BY tags.id
        "#,
    )
    .bind(post_id)
    .bind(Status::VISIBLE)
    .fetch_all(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(result)
}

pub async fn create_tag_in_db(
    pool: &SqlitePool,
    owner: Owner,
    tag: NewTag,
) -> Result<Tag, RequestError> {
    tag.validate()?;
    let NewTag { name, status } = tag;

    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, Tag>(
        r#"
        INSERT INTO tags (name, status, owner_id)
        VALUES ($1, $2, $3)
        RETURNING id, name, status, owner_id, created_time
        "#,
    )
    .bind(name)
    .bind(status)
    .bind(owner.id)
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;
    tracing::debug!(tag_id = result.id, "tag created");
    Ok(result)
}

pub async fn set_tag_status_in_db(
    pool: &SqlitePool,
    owner: Owner,
    id: i64,
    status: Status,
) -> Result<(), RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query("UPDATE tags SET status = $1 WHERE id = $2 AND owner_id = $3")
        .bind(status)
        .bind(id)
        .bind(owner.id)
        .execute(&mut tx)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound("Tag not found"));
    }
    tx.commit().await?;
    Ok(())
}
