#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use myblog::{
    create_category_in_db, create_tag_in_db, get_random_free_port, init_db, insert_user,
    make_router, run_app, save_post_in_db, Category, NewCategory, NewTag, Owner, Post, PostForm,
    PostStatus, Status, Tag,
};
use reqwest::StatusCode;
use serde_json::Value;
use sqlx::SqlitePool;

pub struct TestApp {
    pub base: String,
    pub pool: SqlitePool,
    pub client: reqwest::Client,
    db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut path = self.db_path.clone().into_os_string();
            path.push(suffix);
            let _ = std::fs::remove_file(path);
        }
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn get_json(&self, path: &str) -> (StatusCode, Value) {
        let response = self.client.get(self.url(path)).send().await.unwrap();
        let status = response.status();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        (status, body)
    }
}

pub async fn spawn_app() -> TestApp {
    let db_path = std::env::temp_dir().join(format!("myblog-test-{:032x}.db", rand::random::<u128>()));
    let db_url = format!("sqlite://{}", db_path.display());
    let pool = init_db(&db_url).await.unwrap();

    let (_, addr) = get_random_free_port().unwrap();
    let server_pool = pool.clone();
    tokio::spawn(async move {
        run_app(make_router(), addr, server_pool).await.unwrap();
    });

    let app = TestApp {
        base: format!("http://{}", addr),
        pool,
        client: reqwest::Client::new(),
        db_path,
    };
    for _ in 0..50 {
        if let Ok(response) = app.client.get(app.url("/check_health")).send().await {
            if response.status().is_success() {
                return app;
            }
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("server did not start on {}", addr);
}

pub struct Seed {
    pub owner: Owner,
    pub category: Category,
    pub tag: Tag,
}

pub async fn seed(pool: &SqlitePool) -> Seed {
    let user = insert_user(pool, "admin").await.unwrap();
    let owner = Owner { id: user.id };
    let category = create_category(pool, owner, "Rust", true).await;
    let tag = create_tag(pool, owner, "axum").await;
    Seed {
        owner,
        category,
        tag,
    }
}

pub async fn create_category(pool: &SqlitePool, owner: Owner, name: &str, is_nav: bool) -> Category {
    create_category_in_db(
        pool,
        owner,
        NewCategory {
            name: name.to_owned(),
            status: Status::Normal,
            is_nav,
        },
    )
    .await
    .unwrap()
}

pub async fn create_tag(pool: &SqlitePool, owner: Owner, name: &str) -> Tag {
    create_tag_in_db(
        pool,
        owner,
        NewTag {
            name: name.to_owned(),
            status: Status::Normal,
        },
    )
    .await
    .unwrap()
}

pub fn post_form(name: &str, category: i64) -> PostForm {
    PostForm {
        name: name.to_owned(),
        status: PostStatus::Normal,
        desc: String::new(),
        content: format!("# {name}"),
        category,
        tags: vec![],
    }
}

pub async fn publish(pool: &SqlitePool, owner: Owner, form: PostForm) -> Post {
    save_post_in_db(pool, owner, None, form).await.unwrap()
}

pub fn names(body: &Value) -> Vec<String> {
    body["post_list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|post| post["name"].as_str().unwrap().to_owned())
        .collect()
}
