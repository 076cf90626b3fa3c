pub mod request;
pub mod response;
pub mod wrapper;

pub use request::*;
pub use response::*;
pub use wrapper::*;

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug)]
pub struct PageQueryParams {
    #[serde(default = "get_default_page")]
    pub page: i64,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct SearchQueryParams {
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default = "get_default_page")]
    pub page: i64,
}

fn get_default_page() -> i64 {
    1
}
