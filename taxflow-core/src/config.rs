use std::env;

/// Server configuration, read once at startup and shared through `AppState`.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// HS256 secret used to verify bearer tokens
    pub jwt_secret: String,
}

impl Config {
    /// Loads `.env` (if present) and reads the process environment.
    ///
    /// `JWT_SECRET` is required; `SERVER_HOST` and `SERVER_PORT` default to
    /// `0.0.0.0:3000`.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let config = Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid SERVER_PORT"))?,
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable required"))
                .and_then(|secret| {
                    if secret.trim().is_empty() {
                        anyhow::bail!("JWT_SECRET cannot be empty");
                    }
                    Ok(secret)
                })?,
        };

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Server address: {}", config.bind_address());

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
