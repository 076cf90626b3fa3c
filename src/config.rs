use std::net::SocketAddr;

use anyhow::{Context, Result};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";

/// Process settings, read from the environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());
        Self::new(database_url, &bind_addr)
    }

    pub fn new(database_url: String, bind_addr: &str) -> Result<Self> {
        let bind_addr = bind_addr
            .parse()
            .with_context(|| format!("BIND_ADDR {bind_addr:?} is not a socket address"))?;
        Ok(Config {
            database_url,
            bind_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bind_address() {
        let config = Config::new("sqlite://blog.db".to_owned(), DEFAULT_BIND_ADDR).unwrap();
        assert_eq!(config.bind_addr.port(), 3001);
    }

    #[test]
    fn rejects_bad_bind_address() {
        assert!(Config::new("sqlite://blog.db".to_owned(), "localhost").is_err());
    }
}
