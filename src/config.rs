use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub mongo_host: String,
    pub mongo_port: u16,
    pub mongo_db: String,
    /// Server-selection timeout for the liveness ping, in milliseconds.
    pub mongo_timeout_ms: u64,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            mongo_host: std::env::var("MONGO_HOST").unwrap_or_else(|_| "localhost".to_string()),
            mongo_port: std::env::var("MONGO_PORT")
                .unwrap_or_else(|_| "27017".to_string())
                .parse()
                .context("MONGO_PORT must be a valid number")?,
            mongo_db: std::env::var("MONGO_DB").unwrap_or_else(|_| "ecs_demo".to_string()),
            mongo_timeout_ms: std::env::var("MONGO_TIMEOUT_MS")
                .unwrap_or_else(|_| "2000".to_string())
                .parse()
                .context("MONGO_TIMEOUT_MS must be a valid number")?,
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "80".to_string())
                .parse()
                .context("PORT must be a valid number")?,
        })
    }
}
