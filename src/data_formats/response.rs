use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::{Category, Comment, DisplayType, Link, Post, PostSummary, Tag, User};
use crate::pagination::Page;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub is_nav: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TagResponse {
    pub id: i64,
    pub name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct OwnerResponse {
    pub id: i64,
    pub username: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PostSummaryResponse {
    pub id: i64,
    pub name: String,
    pub desc: String,
    pub category: CategoryRef,
    pub owner: OwnerResponse,
    pub created_time: NaiveDateTime,
    pub pv: i64,
    pub uv: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PostResponse {
    pub id: i64,
    pub name: String,
    pub desc: String,
    pub content_html: String,
    pub category: CategoryRef,
    pub owner: OwnerResponse,
    pub tags: Vec<TagResponse>,
    pub created_time: NaiveDateTime,
    pub pv: i64,
    pub uv: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CommentResponse {
    pub id: i64,
    pub target: i64,
    pub nickname: String,
    pub website: String,
    pub content: String,
    pub created_time: NaiveDateTime,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SideBarResponse {
    pub id: i64,
    pub name: String,
    pub display_type: DisplayType,
    pub content_html: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LinkResponse {
    pub id: i64,
    pub name: String,
    pub href: String,
    pub weight: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PageResponse {
    pub number: i64,
    pub num_pages: i64,
    pub count: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl From<Category> for CategoryResponse {
    fn from(Category { id, name, is_nav, .. }: Category) -> Self {
        CategoryResponse { id, name, is_nav }
    }
}

impl From<Tag> for TagResponse {
    fn from(Tag { id, name, .. }: Tag) -> Self {
        TagResponse { id, name }
    }
}

impl From<User> for OwnerResponse {
    fn from(User { id, username, .. }: User) -> Self {
        OwnerResponse { id, username }
    }
}

impl From<PostSummary> for PostSummaryResponse {
    fn from(
        PostSummary {
            id,
            name,
            desc,
            owner_id,
            owner_username,
            category_id,
            category_name,
            created_time,
            pv,
            uv,
        }: PostSummary,
    ) -> Self {
        PostSummaryResponse {
            id,
            name,
            desc,
            category: CategoryRef {
                id: category_id,
                name: category_name,
            },
            owner: OwnerResponse {
                id: owner_id,
                username: owner_username,
            },
            created_time,
            pv,
            uv,
        }
    }
}

impl PostResponse {
    pub fn new(
        Post {
            id,
            name,
            desc,
            content_html,
            owner_id,
            owner_username,
            category_id,
            category_name,
            created_time,
            pv,
            uv,
            ..
        }: Post,
        tags: Vec<Tag>,
    ) -> Self {
        PostResponse {
            id,
            name,
            desc,
            content_html,
            category: CategoryRef {
                id: category_id,
                name: category_name,
            },
            owner: OwnerResponse {
                id: owner_id,
                username: owner_username,
            },
            tags: tags.into_iter().map(TagResponse::from).collect(),
            created_time,
            pv,
            uv,
        }
    }
}

impl From<Comment> for CommentResponse {
    fn from(
        Comment {
            id,
            target_id,
            nickname,
            website,
            content,
            created_time,
            ..
        }: Comment,
    ) -> Self {
        CommentResponse {
            id,
            target: target_id,
            nickname,
            website,
            content,
            created_time,
        }
    }
}

impl From<Link> for LinkResponse {
    fn from(
        Link {
            id,
            name,
            href,
            weight,
            ..
        }: Link,
    ) -> Self {
        LinkResponse {
            id,
            name,
            href,
            weight,
        }
    }
}

impl<T> From<&Page<T>> for PageResponse {
    fn from(page: &Page<T>) -> Self {
        PageResponse {
            number: page.number,
            num_pages: page.num_pages,
            count: page.count,
            has_next: page.has_next(),
            has_previous: page.has_previous(),
        }
    }
}
