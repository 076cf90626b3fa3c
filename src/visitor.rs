use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderValue};
use rand::Rng;

pub const VISITOR_COOKIE: &str = "uid";

const VISITOR_COOKIE_MAX_AGE: u64 = 365 * 24 * 60 * 60;

/// Identifies a browser across page views, for unique-visitor counting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visitor {
    pub uid: String,
    /// Set when the request carried no usable `uid` cookie and one was minted.
    pub is_new: bool,
}

impl Visitor {
    fn generate() -> Self {
        let uid = format!("{:032x}", rand::thread_rng().gen::<u128>());
        Visitor { uid, is_new: true }
    }

    /// The `Set-Cookie` value to send back, only for newly minted visitors.
    pub fn set_cookie(&self) -> Option<HeaderValue> {
        if !self.is_new {
            return None;
        }
        let cookie = format!(
            "{VISITOR_COOKIE}={}; Max-Age={VISITOR_COOKIE_MAX_AGE}; Path=/; HttpOnly; SameSite=Lax",
            self.uid
        );
        HeaderValue::from_str(&cookie).ok()
    }
}

fn is_valid_uid(uid: &str) -> bool {
    !uid.is_empty() && uid.len() <= 64 && uid.bytes().all(|b| b.is_ascii_alphanumeric())
}

fn uid_from_cookies(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == VISITOR_COOKIE)
        .map(|(_, value)| value.to_owned())
        .filter(|uid| is_valid_uid(uid))
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Visitor
where
    S: Send + Sync + 'static,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        match uid_from_cookies(parts) {
            Some(uid) => Ok(Visitor { uid, is_new: false }),
            None => {
                tracing::debug!("no visitor cookie, issuing a new uid");
                Ok(Visitor::generate())
            }
        }
    }
}
