use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Extension, Json,
};
use sqlx::SqlitePool;

use crate::{
    data_formats::{
        CategoryResponse, CommentRequest, CommentResponse, CommentWrapper, CommonContext,
        DetailPageContext, LinkResponse, LinksPageContext, ListPageContext, OwnerResponse,
        PageQueryParams, PageResponse, PostResponse, PostSummaryResponse, SearchQueryParams,
        TagResponse,
    },
    db_helpers::{
        add_comment_to_post_in_db, get_comments_for_post_in_db, get_links_in_db, get_navs_in_db,
        get_tags_for_post_in_db, get_user_by_id, latest_posts_in_db, posts_by_author_in_db,
        posts_by_category_in_db, posts_by_tag_in_db, search_posts_in_db, view_post_in_db, Navs,
    },
    errors::RequestError,
    models::PostSummary,
    pagination::Page,
    sidebar::get_sidebars,
    visitor::Visitor,
};

type JsonResult<T> = Result<Json<T>, RequestError>;

// ----------------- Helper Functions -----------------

async fn common_context(pool: &SqlitePool) -> Result<CommonContext, RequestError> {
    let Navs { nav, categories } = get_navs_in_db(pool).await?;
    let sidebars = get_sidebars(pool).await?;
    Ok(CommonContext {
        nav: nav.into_iter().map(CategoryResponse::from).collect(),
        categories: categories.into_iter().map(CategoryResponse::from).collect(),
        sidebars,
    })
}

async fn list_page(
    pool: &SqlitePool,
    posts: Page<PostSummary>,
) -> Result<ListPageContext, RequestError> {
    let page_obj = PageResponse::from(&posts);
    let post_list = posts.items.into_iter().map(PostSummaryResponse::from).collect();
    Ok(ListPageContext::new(
        post_list,
        page_obj,
        common_context(pool).await?,
    ))
}

/// Path ids are plain digits; anything else names no resource.
fn parse_path_id(raw: &str, missing: &'static str) -> Result<i64, RequestError> {
    Some(raw)
        .filter(|raw| !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|raw| raw.parse().ok())
        .ok_or(RequestError::NotFound(missing))
}

/// `/post/{id}.html/` arrives as a single `{id}.html` segment.
fn parse_post_file(file: &str) -> Result<i64, RequestError> {
    let id = file
        .strip_suffix(".html")
        .ok_or(RequestError::NotFound("Post not found"))?;
    parse_path_id(id, "Post not found")
}

// ----------------- Helper Handlers -----------------
pub async fn alive() -> &'static str {
    "alive"
}

pub async fn not_found(uri: Uri) -> Result<(), (StatusCode, String)> {
    Err((
        StatusCode::NOT_FOUND,
        format!("URL {} provided was not found", uri),
    ))
}

// ----------------- Post List Handlers -----------------
pub async fn index(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Query(PageQueryParams { page }): Query<PageQueryParams>,
) -> JsonResult<ListPageContext> {
    let posts = latest_posts_in_db(&pool, page).await?;
    Ok(Json(list_page(&pool, posts).await?))
}

pub async fn category_posts(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(category_id): Path<String>,
    Query(PageQueryParams { page }): Query<PageQueryParams>,
) -> JsonResult<ListPageContext> {
    let category_id = parse_path_id(&category_id, "Category not found")?;
    let (category, posts) = posts_by_category_in_db(&pool, category_id, page).await?;
    let mut context = list_page(&pool, posts).await?;
    context.category = Some(CategoryResponse::from(category));
    Ok(Json(context))
}

pub async fn tag_posts(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(tag_id): Path<String>,
    Query(PageQueryParams { page }): Query<PageQueryParams>,
) -> JsonResult<ListPageContext> {
    let tag_id = parse_path_id(&tag_id, "Tag not found")?;
    let (tag, posts) = posts_by_tag_in_db(&pool, tag_id, page).await?;
    let mut context = list_page(&pool, posts).await?;
    context.tag = Some(TagResponse::from(tag));
    Ok(Json(context))
}

pub async fn author_posts(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(owner_id): Path<String>,
    Query(PageQueryParams { page }): Query<PageQueryParams>,
) -> JsonResult<ListPageContext> {
    let owner_id = parse_path_id(&owner_id, "Author not found")?;
    let posts = posts_by_author_in_db(&pool, owner_id, page).await?;
    let mut context = list_page(&pool, posts).await?;
    context.author = get_user_by_id(&pool, owner_id)
        .await?
        .map(OwnerResponse::from);
    Ok(Json(context))
}

pub async fn search(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Query(SearchQueryParams { keyword, page }): Query<SearchQueryParams>,
) -> JsonResult<ListPageContext> {
    let posts = search_posts_in_db(&pool, keyword.as_deref(), page).await?;
    let mut context = list_page(&pool, posts).await?;
    context.keyword = Some(keyword.unwrap_or_default());
    Ok(Json(context))
}

// ----------------- Post Detail Handlers -----------------
pub async fn post_detail(
    Extension(pool): Extension<Arc<SqlitePool>>,
    visitor: Visitor,
    Path(file): Path<String>,
) -> Result<Response, RequestError> {
    let post_id = parse_post_file(&file)?;
    let post = view_post_in_db(&pool, post_id, &visitor.uid).await?;
    let tags = get_tags_for_post_in_db(&pool, post.id).await?;
    let comments = get_comments_for_post_in_db(&pool, post.id).await?;
    let context = DetailPageContext {
        post: PostResponse::new(post, tags),
        comments: comments.into_iter().map(CommentResponse::from).collect(),
        common: common_context(&pool).await?,
    };

    let mut response = Json(context).into_response();
    if let Some(cookie) = visitor.set_cookie() {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    Ok(response)
}

// ----------------- Config Handlers -----------------
pub async fn links(Extension(pool): Extension<Arc<SqlitePool>>) -> JsonResult<LinksPageContext> {
    let links = get_links_in_db(&pool).await?;
    Ok(Json(LinksPageContext {
        links: links.into_iter().map(LinkResponse::from).collect(),
        common: common_context(&pool).await?,
    }))
}

// ----------------- Comment Handlers -----------------
pub async fn add_comment(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Json(request): Json<CommentRequest>,
) -> Result<(StatusCode, Json<CommentWrapper<CommentResponse>>), RequestError> {
    let comment = add_comment_to_post_in_db(&pool, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(CommentWrapper {
            comment: CommentResponse::from(comment),
        }),
    ))
}
