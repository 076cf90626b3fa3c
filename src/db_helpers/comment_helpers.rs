use sqlx::{Sqlite, SqlitePool};
use validator::Validate;

use crate::{
    data_formats::request::CommentRequest,
    errors::RequestError,
    models::{Comment, PostStatus, SoftDelete, Status},
};

use super::get_post_in_db;

const COMMENT_COLUMNS: &str =
    "comments.id, comments.target_id, comments.content, comments.nickname, comments.website, comments.email, comments.status, comments.created_time";

pub async fn add_comment_to_post_in_db(
    pool: &SqlitePool,
    comment: CommentRequest,
) -> Result<Comment, RequestError> {
    comment.validate()?;
    let CommentRequest {
        target,
        nickname,
        email,
        website,
        content,
    } = comment;
    let post = get_post_in_db(pool, target).await?;

    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, Comment>(&format!(
        r#"
        INSERT INTO comments (target_id, content, nickname, website, email)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {COMMENT_COLUMNS}
        "#
    ))
    .bind(post.id)
    .bind(content)
    .bind(nickname)
    .bind(website)
    .bind(email)
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;
    tracing::info!(comment_id = result.id, post_id = post.id, "comment added");
    Ok(result)
}

/// Normal comments on one post, oldest first.
pub async fn get_comments_for_post_in_db(
    pool: &SqlitePool,
    post_id: i64,
) -> Result<Vec<Comment>, RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, Comment>(&format!(
        r#"
        SELECT {COMMENT_COLUMNS}
        FROM comments
        WHERE target_id = $1 AND status = $2
        ORDER BY created_time, id
        "#
    ))
    .bind(post_id)
    .bind(Status::VISIBLE)
    .fetch_all(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(result)
}

/// The newest normal comments left on normal posts.
pub async fn recent_comments_in_db(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<Comment>, RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, Comment>(&format!(
        r#"
        SELECT {COMMENT_COLUMNS}
        FROM comments
            JOIN posts ON posts.id = comments.target_id
        WHERE comments.status = $1 AND posts.status = $2
        ORDER BY comments.created_time DESC, comments.id DESC
        LIMIT $3
        "#
    ))
    .bind(Status::VISIBLE)
    .bind(PostStatus::VISIBLE)
    .bind(limit)
    .fetch_all(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(result)
}

pub async fn set_comment_status_in_db(
    pool: &SqlitePool,
    id: i64,
    status: Status,
) -> Result<(), RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query("UPDATE comments SET status = $1 WHERE id = $2")
        .bind(status)
        .bind(id)
        .execute(&mut tx)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound("Comment not found"));
    }
    tx.commit().await?;
    Ok(())
}
