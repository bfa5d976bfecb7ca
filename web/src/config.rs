//! Server configuration.

use std::net::SocketAddr;

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind.
    pub bind_addr: SocketAddr,

    /// PostgreSQL connection string, when serving against a database.
    pub database_url: Option<String>,
}

impl ServerConfig {
    /// Load configuration from the environment.
    ///
    /// - `BIND_ADDR` (default `127.0.0.1:8080`)
    /// - `DATABASE_URL` (required only with the `postgres` feature)
    #[must_use]
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("BIND_ADDR")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Self::default_bind_addr);

        Self {
            bind_addr,
            database_url: std::env::var("DATABASE_URL").ok(),
        }
    }

    fn default_bind_addr() -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 8080))
    }

    /// Override the bind address.
    #[must_use]
    pub const fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: Self::default_bind_addr(),
            database_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_binds_loopback() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 8080);
        assert!(config.bind_addr.ip().is_loopback());
        assert!(config.database_url.is_none());
    }
}
