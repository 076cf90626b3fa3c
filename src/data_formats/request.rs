use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{DisplayType, PostStatus, SideBarStatus, Status};

// ----------------- Taxonomy Request -----------------
#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct NewCategory {
    #[validate(length(min = 1, max = 30, message = "Name must be 1 to 30 characters"))]
    pub name: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub is_nav: bool,
}

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct NewTag {
    #[validate(length(min = 1, max = 30, message = "Name must be 1 to 30 characters"))]
    pub name: String,
    #[serde(default)]
    pub status: Status,
}

// ----------------- Post Request -----------------
/// Everything an author edits on a post. `content_html` is derived on save
/// and is deliberately absent.
#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct PostForm {
    #[validate(length(min = 1, max = 30, message = "Name must be 1 to 30 characters"))]
    pub name: String,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    #[validate(length(max = 200, message = "Summary must be at most 200 characters"))]
    pub desc: String,
    #[validate(length(min = 1, message = "Content must be Markdown and cannot be empty"))]
    pub content: String,
    pub category: i64,
    #[serde(default)]
    pub tags: Vec<i64>,
}

// ----------------- Config Request -----------------
#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct NewSideBar {
    #[validate(length(min = 1, max = 30, message = "Name must be 1 to 30 characters"))]
    pub name: String,
    #[serde(default)]
    pub display_type: DisplayType,
    #[serde(default)]
    #[validate(length(max = 500, message = "Content must be at most 500 characters"))]
    pub content: String,
    #[serde(default)]
    pub status: SideBarStatus,
}

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct NewLink {
    #[validate(length(min = 1, max = 30, message = "Name must be 1 to 30 characters"))]
    pub name: String,
    #[validate(url(message = "Enter a valid URL"))]
    pub href: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default = "default_weight")]
    #[validate(range(min = 1, max = 5, message = "Weight must be between 1 and 5"))]
    pub weight: i64,
}

fn default_weight() -> i64 {
    1
}

// ----------------- Comment Request -----------------
#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct CommentRequest {
    pub target: i64,
    #[validate(length(min = 1, max = 50, message = "Nickname must be 1 to 50 characters"))]
    pub nickname: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(url(message = "Enter a valid URL"))]
    pub website: String,
    #[validate(length(
        min = 10,
        max = 2000,
        message = "Comment must be 10 to 2000 characters"
    ))]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(content: &str) -> CommentRequest {
        CommentRequest {
            target: 1,
            nickname: "reader".to_owned(),
            email: "reader@example.com".to_owned(),
            website: "https://example.com".to_owned(),
            content: content.to_owned(),
        }
    }

    #[test]
    fn short_comment_is_rejected() {
        let errors = comment("too short").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("content"));
    }

    #[test]
    fn well_formed_comment_passes() {
        assert!(comment("a comment long enough").validate().is_ok());
    }

    #[test]
    fn link_weight_is_bounded() {
        let link = NewLink {
            name: "friend".to_owned(),
            href: "https://friend.example".to_owned(),
            status: Status::Normal,
            weight: 6,
        };
        let errors = link.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("weight"));
    }

    #[test]
    fn link_defaults_to_lightest_weight() {
        let link: NewLink =
            serde_json::from_str(r#"{"name": "friend", "href": "https://friend.example"}"#)
                .unwrap();
        assert_eq!(link.weight, 1);
        assert_eq!(link.status, Status::Normal);
    }
}
