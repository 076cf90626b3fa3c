use sqlx::{Sqlite, SqlitePool};

use crate::{errors::RequestError, models::User};

pub async fn insert_user(pool: &SqlitePool, username: &str) -> Result<User, RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, User>(
        r#"
        INSERT INTO users (username)
        VALUES ($1)
        RETURNING id, username, created_time
        "#,
    )
    .bind(username)
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(result)
}

pub async fn get_user_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, User>(
        r#"
        SELECT id, username, created_time FROM users WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(result)
}
