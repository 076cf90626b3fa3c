use sqlx::{query::QueryAs, query::QueryScalar, sqlite::SqliteArguments, Sqlite};

mod comment_helpers;
mod config_helpers;
mod post_helpers;
mod taxonomy_helpers;
mod user_helpers;

pub use comment_helpers::*;
pub use config_helpers::*;
pub use post_helpers::*;
pub use taxonomy_helpers::*;
pub use user_helpers::*;

/// A value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Param {
    Int(i64),
    Text(String),
}

/// Collects `WHERE` conditions and their bound values in placeholder order.
struct QueryBuilder {
    query: String,
    params: Vec<Param>,
    seperator: &'static str,
}

impl QueryBuilder {
    fn new(seperator: &'static str) -> Self {
        Self {
            query: String::new(),
            params: vec![],
            seperator,
        }
    }

    fn add_condition(mut self, condition: &str, params: impl IntoIterator<Item = Param>) -> Self {
        if !self.query.is_empty() {
            self.query.push_str(self.seperator);
        }
        self.query.push_str(condition);
        self.params.extend(params);
        self
    }

    pub fn build(self) -> (String, Vec<Param>) {
        let query = if self.query.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.query)
        };
        (query, self.params)
    }
}

fn bind_all<'q, O>(
    mut query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    params: Vec<Param>,
) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            Param::Int(value) => query.bind(value),
            Param::Text(value) => query.bind(value),
        };
    }
    query
}

fn bind_all_scalar<'q, O>(
    mut query: QueryScalar<'q, Sqlite, O, SqliteArguments<'q>>,
    params: Vec<Param>,
) -> QueryScalar<'q, Sqlite, O, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            Param::Int(value) => query.bind(value),
            Param::Text(value) => query.bind(value),
        };
    }
    query
}

/// Wraps a keyword for a `LIKE ... ESCAPE '\'` substring match, so `%` and
/// `_` in the keyword match themselves.
fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
