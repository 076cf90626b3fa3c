use sqlx::{Sqlite, SqlitePool, Transaction};
use validator::Validate;

use crate::data_formats::request::PostForm;
use crate::errors::RequestError;
use crate::markdown::render_markdown;
use crate::models::{Category, Owner, Post, PostStatus, PostSummary, SoftDelete, Tag};
use crate::pagination::{Page, Paginator};

use super::{
    bind_all, bind_all_scalar, get_category_in_db, get_tag_in_db, like_pattern, Param,
    QueryBuilder,
};

const POST_FROM: &str = r#"
            FROM   posts
                JOIN users
                    ON users.id = posts.owner_id
                JOIN categories
                    ON categories.id = posts.category_id"#;

const POST_SUMMARY_COLUMNS: &str = r#"
            SELECT posts.id                AS "id",
                   posts.name              AS "name",
                   posts."desc"            AS "desc",
                   posts.owner_id          AS "owner_id",
                   users.username          AS "owner_username",
                   posts.category_id       AS "category_id",
                   categories.name         AS "category_name",
                   posts.created_time      AS "created_time",
                   posts.pv                AS "pv",
                   posts.uv                AS "uv""#;

const POST_COLUMNS: &str = r#"
            SELECT posts.id                AS "id",
                   posts.name              AS "name",
                   posts.status            AS "status",
                   posts."desc"            AS "desc",
                   posts.content           AS "content",
                   posts.content_html      AS "content_html",
                   posts.owner_id          AS "owner_id",
                   users.username          AS "owner_username",
                   posts.category_id       AS "category_id",
                   categories.name         AS "category_name",
                   posts.created_time      AS "created_time",
                   posts.pv                AS "pv",
                   posts.uv                AS "uv""#;

/// Which normal posts a list page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostFilter {
    All,
    Category(i64),
    Tag(i64),
    Author(i64),
    Keyword(String),
}

impl PostFilter {
    /// An empty keyword means no filtering at all. Anything else, whitespace
    /// included, is matched as given.
    pub fn search(keyword: Option<&str>) -> Self {
        match keyword {
            Some(keyword) if !keyword.is_empty() => PostFilter::Keyword(keyword.to_owned()),
            _ => PostFilter::All,
        }
    }

    fn apply(self, builder: QueryBuilder) -> QueryBuilder {
        match self {
            PostFilter::All => builder,
            PostFilter::Category(id) => {
                builder.add_condition("posts.category_id = ?", [Param::Int(id)])
            }
            PostFilter::Tag(id) => builder.add_condition(
                "posts.id IN (SELECT post_id FROM post_tags WHERE tag_id = ?)",
                [Param::Int(id)],
            ),
            PostFilter::Author(id) => builder.add_condition("posts.owner_id = ?", [Param::Int(id)]),
            PostFilter::Keyword(keyword) => {
                let pattern = like_pattern(&keyword.to_lowercase());
                builder.add_condition(
                    r#"(posts.search_name LIKE ? ESCAPE '\' OR posts.search_desc LIKE ? ESCAPE '\')"#,
                    [Param::Text(pattern.clone()), Param::Text(pattern)],
                )
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOrder {
    /// Newest first.
    Latest,
    /// Most viewed first, newest first among equals.
    Hot,
}

impl PostOrder {
    fn order_by(self) -> &'static str {
        match self {
            PostOrder::Latest => " ORDER BY posts.created_time DESC, posts.id DESC",
            PostOrder::Hot => " ORDER BY posts.pv DESC, posts.created_time DESC, posts.id DESC",
        }
    }
}

// ----------------- Helper Functions -----------------

async fn fetch_post(
    tx: &mut Transaction<'_, Sqlite>,
    id: i64,
    status: Option<PostStatus>,
) -> Result<Option<Post>, sqlx::Error> {
    let mut builder =
        QueryBuilder::new(" AND ").add_condition("posts.id = ?", [Param::Int(id)]);
    if let Some(status) = status {
        builder = builder.add_condition("posts.status = ?", [Param::Int(status as i64)]);
    }
    let (filter, params) = builder.build();
    let query = format!("{POST_COLUMNS}{POST_FROM}{filter}");
    bind_all(sqlx::query_as::<Sqlite, Post>(&query), params)
        .fetch_optional(&mut *tx)
        .await
}

async fn replace_post_tags(
    tx: &mut Transaction<'_, Sqlite>,
    post_id: i64,
    tags: &[i64],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM post_tags WHERE post_id = $1")
        .bind(post_id)
        .execute(&mut *tx)
        .await?;
    for tag_id in tags {
        sqlx::query("INSERT OR IGNORE INTO post_tags (post_id, tag_id) VALUES ($1, $2)")
            .bind(post_id)
            .bind(*tag_id)
            .execute(&mut *tx)
            .await?;
    }
    Ok(())
}

async fn check_post_references(
    pool: &SqlitePool,
    category: i64,
    tags: &[i64],
) -> Result<(), RequestError> {
    let category_exists =
        sqlx::query_scalar::<Sqlite, i64>("SELECT id FROM categories WHERE id = $1")
            .bind(category)
            .fetch_optional(pool)
            .await?
            .is_some();
    if !category_exists {
        return Err(RequestError::field("category", "Select a valid category"));
    }
    for tag_id in tags {
        let tag_exists = sqlx::query_scalar::<Sqlite, i64>("SELECT id FROM tags WHERE id = $1")
            .bind(*tag_id)
            .fetch_optional(pool)
            .await?
            .is_some();
        if !tag_exists {
            return Err(RequestError::field("tags", "Select a valid tag"));
        }
    }
    Ok(())
}

// ----------------- Post List Queries -----------------

/// Lists normal posts matching `filter`, one page at a time.
pub async fn list_posts_in_db(
    pool: &SqlitePool,
    filter: PostFilter,
    order: PostOrder,
    page: i64,
) -> Result<Page<PostSummary>, RequestError> {
    let builder = QueryBuilder::new(" AND ").add_condition(
        "posts.status = ?",
        [Param::Int(PostStatus::VISIBLE as i64)],
    );
    let (filter, params) = filter.apply(builder).build();

    let mut tx = pool.begin().await?;
    let count_query = format!("SELECT COUNT(*) {POST_FROM}{filter}");
    let count = bind_all_scalar(sqlx::query_scalar::<Sqlite, i64>(&count_query), params.clone())
        .fetch_one(&mut tx)
        .await?;
    let paginator = Paginator::new(count, page)?;

    let query = format!(
        "{POST_SUMMARY_COLUMNS}{POST_FROM}{filter}{} LIMIT {} OFFSET {}",
        order.order_by(),
        paginator.limit(),
        paginator.offset()
    );
    let posts = bind_all(sqlx::query_as::<Sqlite, PostSummary>(&query), params)
        .fetch_all(&mut tx)
        .await?;
    tx.commit().await?;

    Ok(paginator.page(posts))
}

pub async fn latest_posts_in_db(
    pool: &SqlitePool,
    page: i64,
) -> Result<Page<PostSummary>, RequestError> {
    list_posts_in_db(pool, PostFilter::All, PostOrder::Latest, page).await
}

pub async fn hot_posts_in_db(
    pool: &SqlitePool,
    page: i64,
) -> Result<Page<PostSummary>, RequestError> {
    list_posts_in_db(pool, PostFilter::All, PostOrder::Hot, page).await
}

/// Fails with NotFound when the category is missing or deleted, never with an
/// empty page.
pub async fn posts_by_category_in_db(
    pool: &SqlitePool,
    category_id: i64,
    page: i64,
) -> Result<(Category, Page<PostSummary>), RequestError> {
    let category = get_category_in_db(pool, category_id).await?;
    let posts = list_posts_in_db(
        pool,
        PostFilter::Category(category.id),
        PostOrder::Latest,
        page,
    )
    .await?;
    Ok((category, posts))
}

pub async fn posts_by_tag_in_db(
    pool: &SqlitePool,
    tag_id: i64,
    page: i64,
) -> Result<(Tag, Page<PostSummary>), RequestError> {
    let tag = get_tag_in_db(pool, tag_id).await?;
    let posts = list_posts_in_db(pool, PostFilter::Tag(tag.id), PostOrder::Latest, page).await?;
    Ok((tag, posts))
}

pub async fn posts_by_author_in_db(
    pool: &SqlitePool,
    owner_id: i64,
    page: i64,
) -> Result<Page<PostSummary>, RequestError> {
    list_posts_in_db(pool, PostFilter::Author(owner_id), PostOrder::Latest, page).await
}

pub async fn search_posts_in_db(
    pool: &SqlitePool,
    keyword: Option<&str>,
    page: i64,
) -> Result<Page<PostSummary>, RequestError> {
    list_posts_in_db(pool, PostFilter::search(keyword), PostOrder::Latest, page).await
}

// ----------------- Post Detail Queries -----------------

/// Returns a normal post, or NotFound for anything else.
pub async fn get_post_in_db(pool: &SqlitePool, id: i64) -> Result<Post, RequestError> {
    let mut tx = pool.begin().await?;
    let result = fetch_post(&mut tx, id, Some(PostStatus::VISIBLE)).await?;
    tx.commit().await?;
    result.ok_or(RequestError::NotFound("Post not found"))
}

/// Counts one page view of a normal post. `pv` always goes up by one; `uv`
/// goes up only on the visitor's first view of the post that (UTC) day.
/// Both are in-place increments, so concurrent views never lose updates.
pub async fn record_post_view_in_db(
    pool: &SqlitePool,
    id: i64,
    visitor: &str,
) -> Result<(), RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query("UPDATE posts SET pv = pv + 1 WHERE id = $1 AND status = $2")
        .bind(id)
        .bind(PostStatus::VISIBLE)
        .execute(&mut tx)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound("Post not found"));
    }

    let first_visit = sqlx::query(
        r#"
        INSERT OR IGNORE INTO post_visits (post_id, visitor, day)
        VALUES ($1, $2, date('now'))
        "#,
    )
    .bind(id)
    .bind(visitor)
    .execute(&mut tx)
    .await?;
    if first_visit.rows_affected() == 1 {
        sqlx::query("UPDATE posts SET uv = uv + 1 WHERE id = $1")
            .bind(id)
            .execute(&mut tx)
            .await?;
    }
    tx.commit().await?;
    Ok(())
}

/// Records a view and returns the post as the visitor sees it.
pub async fn view_post_in_db(
    pool: &SqlitePool,
    id: i64,
    visitor: &str,
) -> Result<Post, RequestError> {
    record_post_view_in_db(pool, id, visitor).await?;
    get_post_in_db(pool, id).await
}

// ----------------- Post Write Queries -----------------

/// Creates a post (`id` is `None`) or updates one of the owner's posts.
/// `content_html` is re-rendered from `content` on every save.
pub async fn save_post_in_db(
    pool: &SqlitePool,
    owner: Owner,
    id: Option<i64>,
    form: PostForm,
) -> Result<Post, RequestError> {
    form.validate()?;
    let PostForm {
        name,
        status,
        desc,
        content,
        category,
        tags,
    } = form;
    let content_html = render_markdown(&content);
    let (search_name, search_desc) = (name.to_lowercase(), desc.to_lowercase());

    check_post_references(pool, category, &tags).await?;

    // The first statement in this transaction must be a write.
    let mut tx = pool.begin().await?;
    let post_id = match id {
        None => {
            sqlx::query_scalar::<Sqlite, i64>(
                r#"
                INSERT INTO posts (name, status, "desc", content, content_html, search_name,
                                   search_desc, owner_id, category_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                RETURNING id
                "#,
            )
            .bind(name)
            .bind(status)
            .bind(desc)
            .bind(content)
            .bind(content_html)
            .bind(search_name)
            .bind(search_desc)
            .bind(owner.id)
            .bind(category)
            .fetch_one(&mut tx)
            .await?
        }
        Some(id) => {
            let result = sqlx::query(
                r#"
                UPDATE posts
                SET name = $1, status = $2, "desc" = $3, content = $4, content_html = $5,
                    search_name = $6, search_desc = $7, category_id = $8
                WHERE id = $9 AND owner_id = $10
                "#,
            )
            .bind(name)
            .bind(status)
            .bind(desc)
            .bind(content)
            .bind(content_html)
            .bind(search_name)
            .bind(search_desc)
            .bind(category)
            .bind(id)
            .bind(owner.id)
            .execute(&mut tx)
            .await?;
            if result.rows_affected() == 0 {
                return Err(RequestError::NotFound("Post not found"));
            }
            id
        }
    };
    replace_post_tags(&mut tx, post_id, &tags).await?;

    let post = fetch_post(&mut tx, post_id, None)
        .await?
        .ok_or(RequestError::ServerError)?;
    tx.commit().await?;
    tracing::info!(post_id, created = id.is_none(), "post saved");
    Ok(post)
}

pub async fn set_post_status_in_db(
    pool: &SqlitePool,
    owner: Owner,
    id: i64,
    status: PostStatus,
) -> Result<(), RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query("UPDATE posts SET status = $1 WHERE id = $2 AND owner_id = $3")
        .bind(status)
        .bind(id)
        .bind(owner.id)
        .execute(&mut tx)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound("Post not found"));
    }
    tx.commit().await?;
    Ok(())
}
