use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Status flag shared by every soft-deletable record. Rows are never removed,
/// reads only ever see the `VISIBLE` state.
pub trait SoftDelete: Copy + PartialEq {
    const VISIBLE: Self;

    fn is_visible(self) -> bool {
        self == Self::VISIBLE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[repr(i64)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Deleted = 0,
    Normal = 1,
}

impl SoftDelete for Status {
    const VISIBLE: Self = Status::Normal;
}

impl Default for Status {
    fn default() -> Self {
        Status::Normal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[repr(i64)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Deleted = 0,
    Normal = 1,
    Draft = 2,
}

impl SoftDelete for PostStatus {
    const VISIBLE: Self = PostStatus::Normal;
}

impl Default for PostStatus {
    fn default() -> Self {
        PostStatus::Normal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[repr(i64)]
#[serde(rename_all = "lowercase")]
pub enum SideBarStatus {
    Hide = 0,
    Show = 1,
}

impl SoftDelete for SideBarStatus {
    const VISIBLE: Self = SideBarStatus::Show;
}

impl Default for SideBarStatus {
    fn default() -> Self {
        SideBarStatus::Show
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[repr(i64)]
#[serde(rename_all = "snake_case")]
pub enum DisplayType {
    Html = 1,
    LatestPosts = 2,
    HotPosts = 3,
    RecentComments = 4,
}

impl Default for DisplayType {
    fn default() -> Self {
        DisplayType::Html
    }
}

/// The user on whose behalf a write happens. Passed explicitly to every
/// operation that records an owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner {
    pub id: i64,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub created_time: NaiveDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub status: Status,
    pub is_nav: bool,
    pub owner_id: i64,
    pub created_time: NaiveDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub status: Status,
    pub owner_id: i64,
    pub created_time: NaiveDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub name: String,
    pub status: PostStatus,
    pub desc: String,
    pub content: String,
    pub content_html: String,
    pub owner_id: i64,
    pub owner_username: String,
    pub category_id: i64,
    pub category_name: String,
    pub created_time: NaiveDateTime,
    pub pv: i64,
    pub uv: i64,
}

/// A post as it appears in list pages and sidebar blocks.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostSummary {
    pub id: i64,
    pub name: String,
    pub desc: String,
    pub owner_id: i64,
    pub owner_username: String,
    pub category_id: i64,
    pub category_name: String,
    pub created_time: NaiveDateTime,
    pub pv: i64,
    pub uv: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub target_id: i64,
    pub content: String,
    pub nickname: String,
    pub website: String,
    pub email: String,
    pub status: Status,
    pub created_time: NaiveDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SideBar {
    pub id: i64,
    pub name: String,
    pub display_type: DisplayType,
    pub content: String,
    pub status: SideBarStatus,
    pub owner_id: i64,
    pub created_time: NaiveDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub name: String,
    pub href: String,
    pub status: Status,
    pub weight: i64,
    pub owner_id: i64,
    pub created_time: NaiveDateTime,
}
