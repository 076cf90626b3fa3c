mod common;

use common::{create_category, post_form, publish, seed, spawn_app};
use myblog::{
    add_comment_to_post_in_db, create_link_in_db, create_sidebar_in_db, get_navs_in_db,
    hot_posts_in_db, record_post_view_in_db, set_category_status_in_db, set_link_status_in_db,
    set_sidebar_status_in_db, CommentRequest, DisplayType, NewLink, NewSideBar, RequestError,
    SideBarStatus, Status,
};
use reqwest::StatusCode;

#[tokio::test]
async fn navigation_splits_visible_categories() {
    let app = spawn_app().await;
    let seed = seed(&app.pool).await;
    let life = create_category(&app.pool, seed.owner, "Life", false).await;
    let gone = create_category(&app.pool, seed.owner, "Gone", true).await;
    set_category_status_in_db(&app.pool, seed.owner, gone.id, Status::Deleted)
        .await
        .unwrap();

    let navs = get_navs_in_db(&app.pool).await.unwrap();
    let nav: Vec<i64> = navs.nav.iter().map(|category| category.id).collect();
    let categories: Vec<i64> = navs.categories.iter().map(|category| category.id).collect();
    assert_eq!(nav, vec![seed.category.id]);
    assert_eq!(categories, vec![life.id]);

    let (_, body) = app.get_json("/links/").await;
    assert_eq!(body["nav"].as_array().unwrap().len(), 1);
    assert_eq!(body["categories"][0]["name"], "Life");
}

#[tokio::test]
async fn hot_posts_order_by_views_then_recency() {
    let app = spawn_app().await;
    let seed = seed(&app.pool).await;
    let older = publish(&app.pool, seed.owner, post_form("older", seed.category.id)).await;
    let newer = publish(&app.pool, seed.owner, post_form("newer", seed.category.id)).await;
    let popular = publish(&app.pool, seed.owner, post_form("popular", seed.category.id)).await;
    for _ in 0..2 {
        record_post_view_in_db(&app.pool, popular.id, "reader")
            .await
            .unwrap();
    }

    let hot = hot_posts_in_db(&app.pool, 1).await.unwrap();
    let ids: Vec<i64> = hot.items.iter().map(|post| post.id).collect();
    assert_eq!(ids, vec![popular.id, newer.id, older.id]);
    assert!(hot.items.windows(2).all(|pair| pair[0].pv >= pair[1].pv));
}

#[tokio::test]
async fn sidebars_resolve_their_content_per_request() {
    let app = spawn_app().await;
    let seed = seed(&app.pool).await;
    let sidebar = |name: &str, display_type, content: &str| NewSideBar {
        name: name.to_owned(),
        display_type,
        content: content.to_owned(),
        status: SideBarStatus::Show,
    };
    create_sidebar_in_db(&app.pool, seed.owner, sidebar("about", DisplayType::Html, "<p>hi</p>"))
        .await
        .unwrap();
    create_sidebar_in_db(&app.pool, seed.owner, sidebar("latest", DisplayType::LatestPosts, ""))
        .await
        .unwrap();
    create_sidebar_in_db(&app.pool, seed.owner, sidebar("hot", DisplayType::HotPosts, ""))
        .await
        .unwrap();
    create_sidebar_in_db(
        &app.pool,
        seed.owner,
        sidebar("comments", DisplayType::RecentComments, ""),
    )
    .await
    .unwrap();
    let hidden = create_sidebar_in_db(&app.pool, seed.owner, sidebar("hidden", DisplayType::Html, "secret"))
        .await
        .unwrap();
    set_sidebar_status_in_db(&app.pool, seed.owner, hidden.id, SideBarStatus::Hide)
        .await
        .unwrap();

    let (_, body) = app.get_json("/").await;
    let sidebars = body["sidebars"].as_array().unwrap();
    assert_eq!(sidebars.len(), 4);
    assert_eq!(sidebars[0]["content_html"], "<p>hi</p>");
    assert!(!sidebars[1]["content_html"].as_str().unwrap().contains("<li>"));

    let post = publish(&app.pool, seed.owner, post_form("Fresh", seed.category.id)).await;
    add_comment_to_post_in_db(
        &app.pool,
        CommentRequest {
            target: post.id,
            nickname: "reader".to_owned(),
            email: "reader@example.com".to_owned(),
            website: "https://reader.example".to_owned(),
            content: "Nice & tidy writeup".to_owned(),
        },
    )
    .await
    .unwrap();

    let (_, body) = app.get_json("/").await;
    let sidebars = body["sidebars"].as_array().unwrap();
    let link = format!(r#"<a href="/post/{}.html/">Fresh</a>"#, post.id);
    assert!(sidebars[1]["content_html"].as_str().unwrap().contains(&link));
    assert!(sidebars[2]["content_html"].as_str().unwrap().contains(&link));
    assert!(sidebars[3]["content_html"]
        .as_str()
        .unwrap()
        .contains("Nice &amp; tidy writeup"));
    assert_eq!(sidebars[3]["display_type"], "recent_comments");
}

#[tokio::test]
async fn links_page_orders_by_weight() {
    let app = spawn_app().await;
    let seed = seed(&app.pool).await;
    let link = |name: &str, weight| NewLink {
        name: name.to_owned(),
        href: format!("https://{name}.example"),
        status: Status::Normal,
        weight,
    };
    create_link_in_db(&app.pool, seed.owner, link("light", 1)).await.unwrap();
    create_link_in_db(&app.pool, seed.owner, link("heavy", 5)).await.unwrap();
    let dropped = create_link_in_db(&app.pool, seed.owner, link("dropped", 5))
        .await
        .unwrap();
    create_link_in_db(&app.pool, seed.owner, link("middle", 3)).await.unwrap();
    set_link_status_in_db(&app.pool, seed.owner, dropped.id, Status::Deleted)
        .await
        .unwrap();

    let (status, body) = app.get_json("/links/").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["links"]
        .as_array()
        .unwrap()
        .iter()
        .map(|link| link["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["heavy", "middle", "light"]);
}

#[tokio::test]
async fn invalid_links_are_rejected() {
    let app = spawn_app().await;
    let seed = seed(&app.pool).await;
    let result = create_link_in_db(
        &app.pool,
        seed.owner,
        NewLink {
            name: "broken".to_owned(),
            href: "not a url".to_owned(),
            status: Status::Normal,
            weight: 9,
        },
    )
    .await;
    match result {
        Err(RequestError::Validation(errors)) => {
            assert!(errors.contains_key("href"));
            assert!(errors.contains_key("weight"));
        }
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_routes_are_not_found() {
    let app = spawn_app().await;
    let response = app.client.get(app.url("/admin/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
