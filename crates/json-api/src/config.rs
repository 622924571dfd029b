//! Server configuration module

use std::path::PathBuf;

use clap::Parser;

use vitrine_app::context::AppConfig;

/// Vitrine JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "vitrine-json", about = "Vitrine JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value = "3000")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Directory for uploaded product images
    #[arg(long, env = "UPLOADS_DIR", default_value = "uploads")]
    pub uploads_dir: PathBuf,

    /// Secret used to sign admin session tokens
    #[arg(long, env = "SESSION_SECRET", hide_env_values = true)]
    pub session_secret: String,

    /// Session token lifetime in minutes
    #[arg(long, env = "SESSION_TTL_MINUTES", default_value = "720")]
    pub session_ttl_minutes: i64,

    /// Admin username to seed at startup
    #[arg(long, env = "ADMIN_USERNAME")]
    pub admin_username: Option<String>,

    /// Admin password to seed at startup
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The subset of configuration the app context needs
    #[must_use]
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            database_url: self.database_url.clone(),
            uploads_dir: self.uploads_dir.clone(),
            session_secret: self.session_secret.clone(),
            session_ttl_minutes: self.session_ttl_minutes,
            admin_username: self.admin_username.clone(),
            admin_password: self.admin_password.clone(),
        }
    }
}
