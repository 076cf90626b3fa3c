use serde::{Deserialize, Serialize};

use super::response::{
    CategoryResponse, CommentResponse, LinkResponse, OwnerResponse, PageResponse, PostResponse,
    PostSummaryResponse, SideBarResponse, TagResponse,
};

/// Navigation and sidebars, shared by every public page.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct CommonContext {
    pub nav: Vec<CategoryResponse>,
    pub categories: Vec<CategoryResponse>,
    pub sidebars: Vec<SideBarResponse>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ListPageContext {
    pub post_list: Vec<PostSummaryResponse>,
    pub page_obj: PageResponse,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<TagResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<OwnerResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(flatten)]
    pub common: CommonContext,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DetailPageContext {
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
    #[serde(flatten)]
    pub common: CommonContext,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LinksPageContext {
    pub links: Vec<LinkResponse>,
    #[serde(flatten)]
    pub common: CommonContext,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CommentWrapper<T> {
    pub comment: T,
}

impl ListPageContext {
    pub fn new(
        post_list: Vec<PostSummaryResponse>,
        page_obj: PageResponse,
        common: CommonContext,
    ) -> Self {
        ListPageContext {
            post_list,
            page_obj,
            category: None,
            tag: None,
            author: None,
            keyword: None,
            common,
        }
    }
}
