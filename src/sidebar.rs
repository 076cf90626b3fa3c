use askama::Template;
use sqlx::SqlitePool;

use crate::data_formats::SideBarResponse;
use crate::db_helpers::{get_sidebars_in_db, hot_posts_in_db, latest_posts_in_db, recent_comments_in_db};
use crate::errors::RequestError;
use crate::models::{Comment, DisplayType, PostSummary, SideBar};
use crate::pagination::PAGE_SIZE;

#[derive(Template)]
#[template(path = "block/sidebar_posts.html")]
struct SideBarPostsTemplate<'a> {
    posts: &'a Vec<PostSummary>,
}

#[derive(Template)]
#[template(path = "block/sidebar_comments.html")]
struct SideBarCommentsTemplate<'a> {
    comments: &'a Vec<Comment>,
}

/// What a sidebar shows. Only `Html` carries stored content; the rest are
/// looked up each time the sidebar is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideBarContent {
    Html(String),
    LatestPosts,
    HotPosts,
    RecentComments,
}

impl From<&SideBar> for SideBarContent {
    fn from(sidebar: &SideBar) -> Self {
        match sidebar.display_type {
            DisplayType::Html => SideBarContent::Html(sidebar.content.clone()),
            DisplayType::LatestPosts => SideBarContent::LatestPosts,
            DisplayType::HotPosts => SideBarContent::HotPosts,
            DisplayType::RecentComments => SideBarContent::RecentComments,
        }
    }
}

impl SideBarContent {
    pub async fn render(&self, pool: &SqlitePool) -> Result<String, RequestError> {
        let html = match self {
            SideBarContent::Html(content) => content.clone(),
            SideBarContent::LatestPosts => {
                let posts = latest_posts_in_db(pool, 1).await?;
                SideBarPostsTemplate {
                    posts: &posts.items,
                }
                .render()?
            }
            SideBarContent::HotPosts => {
                let posts = hot_posts_in_db(pool, 1).await?;
                SideBarPostsTemplate {
                    posts: &posts.items,
                }
                .render()?
            }
            SideBarContent::RecentComments => {
                let comments = recent_comments_in_db(pool, PAGE_SIZE).await?;
                SideBarCommentsTemplate {
                    comments: &comments,
                }
                .render()?
            }
        };
        Ok(html)
    }
}

/// Shown sidebars with their content resolved for this request.
pub async fn get_sidebars(pool: &SqlitePool) -> Result<Vec<SideBarResponse>, RequestError> {
    let sidebars = get_sidebars_in_db(pool).await?;
    let mut result = Vec::with_capacity(sidebars.len());
    for sidebar in sidebars {
        let content_html = SideBarContent::from(&sidebar).render(pool).await?;
        result.push(SideBarResponse {
            id: sidebar.id,
            name: sidebar.name,
            display_type: sidebar.display_type,
            content_html,
        });
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::{SideBarStatus, Status};

    fn created() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 4, 1)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    #[test]
    fn only_html_sidebars_keep_their_content() {
        let mut sidebar = SideBar {
            id: 1,
            name: "about".to_owned(),
            display_type: DisplayType::Html,
            content: "<p>hello</p>".to_owned(),
            status: SideBarStatus::Show,
            owner_id: 1,
            created_time: created(),
        };
        assert_eq!(
            SideBarContent::from(&sidebar),
            SideBarContent::Html("<p>hello</p>".to_owned())
        );
        sidebar.display_type = DisplayType::HotPosts;
        assert_eq!(SideBarContent::from(&sidebar), SideBarContent::HotPosts);
    }

    #[test]
    fn comment_block_escapes_user_input() {
        let comments = vec![Comment {
            id: 1,
            target_id: 3,
            content: "<script>alert(1)</script>".to_owned(),
            nickname: "mallory".to_owned(),
            website: "https://example.com".to_owned(),
            email: "m@example.com".to_owned(),
            status: Status::Normal,
            created_time: created(),
        }];
        let html = SideBarCommentsTemplate {
            comments: &comments,
        }
        .render()
        .unwrap();
        assert!(html.contains("/post/3.html/"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn post_block_links_to_detail_pages() {
        let posts = vec![PostSummary {
            id: 7,
            name: "Hello".to_owned(),
            desc: String::new(),
            owner_id: 1,
            owner_username: "admin".to_owned(),
            category_id: 1,
            category_name: "rust".to_owned(),
            created_time: created(),
            pv: 1,
            uv: 1,
        }];
        let html = SideBarPostsTemplate { posts: &posts }.render().unwrap();
        assert!(html.contains(r#"<a href="/post/7.html/">Hello</a>"#));
    }
}
