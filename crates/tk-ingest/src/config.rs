//! Runtime configuration for the ingester.
//!
//! Uses figment2 for layered config with precedence:
//! `defaults → config file → env vars → CLI args`.

use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, error::ErrorKind};
use figment2::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use serde::{Deserialize, Serialize};
use serde_inline_default::serde_inline_default;

/// Ingester configuration: CLI flags double as config keys via figment2's
/// `Serialized` provider.
///
/// Precedence: defaults < config file < env vars < CLI args
#[serde_inline_default]
#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(author, version, about = "Tweedekamer motions ETL engine")]
pub struct Config {
    /// Path to config file
    #[arg(long, default_value = "configs/config.yaml")]
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Only ingest cases modified since this time (RFC 3339 or a symbolic
    /// value: today, yesterday, this-week, last-week, this-month, last-month)
    #[arg(long)]
    pub after: Option<String>,

    /// Truncate all tables before starting the run
    #[arg(long, env = "TK_CLEAN_DB")]
    #[serde_inline_default(false)]
    pub clean_db: bool,

    // === Upstream endpoints ===
    #[arg(long, env = "TK_ODATA_BASE_URL")]
    #[serde_inline_default(String::from("https://gegevensmagazijn.tweedekamer.nl/OData/v4/2.0/"))]
    pub odata_base_url: String,

    #[arg(long, env = "TK_ARCHIVE_BASE_URL")]
    #[serde_inline_default(String::from("https://zoek.officielebekendmakingen.nl/"))]
    pub archive_base_url: String,

    #[arg(long, env = "TK_REQUEST_TIMEOUT_SECS")]
    #[serde_inline_default(60)]
    pub request_timeout_secs: u64,

    #[arg(long, env = "TK_USER_AGENT")]
    #[serde_inline_default(String::from("tk-ingest/0.1"))]
    pub user_agent: String,

    // === Database ===
    /// Single connection string; supersedes the discrete `db_*` fields
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    #[arg(long, env = "TK_DB_HOST")]
    pub db_host: Option<String>,

    #[arg(long, env = "TK_DB_PORT")]
    pub db_port: Option<u16>,

    #[arg(long, env = "TK_DB_NAME")]
    pub db_name: Option<String>,

    #[arg(long, env = "TK_DB_USER")]
    pub db_user: Option<String>,

    #[arg(long, env = "TK_DB_PASSWORD")]
    pub db_password: Option<String>,

    #[arg(long, env = "TK_MAX_DB_CONNECTIONS")]
    #[serde_inline_default(10)]
    pub max_db_connections: u32,

    // === Run modes ===
    /// Issue one OData probe request, print it, and exit
    #[arg(long, env = "TK_TEST_MODE")]
    #[serde_inline_default(false)]
    pub test_mode: bool,

    /// Print the `=== Import Statistics ===` block after the run
    #[arg(long, env = "TK_SHOW_STATS")]
    #[serde_inline_default(true)]
    pub show_stats: bool,
}

impl Config {
    /// Load config with layered precedence:
    /// defaults < YAML file < env vars < CLI args
    ///
    /// # Errors
    /// Returns an error if config parsing fails.
    pub fn load() -> color_eyre::Result<Self> {
        let cli = Self::parse();

        let config: Self = Figment::new()
            .merge(Yaml::file(&cli.config_path))
            .merge(Env::prefixed("TK_"))
            .merge(Serialized::defaults(cli))
            .extract()?;

        config.validate();
        Ok(config)
    }

    /// Load config from a specific path (for tests).
    ///
    /// # Errors
    /// Returns an error if config parsing fails.
    pub fn load_from(config_path: &Path) -> color_eyre::Result<Self> {
        let config: Self =
            Figment::new().merge(Yaml::file(config_path)).merge(Env::prefixed("TK_")).extract()?;
        config.validate();
        Ok(config)
    }

    fn validate(&self) {
        if self.odata_base_url.trim().is_empty() {
            let mut cmd = Self::command();
            cmd.error(ErrorKind::MissingRequiredArgument, "odata_base_url must not be empty").exit();
        }
        if self.database_url.is_none() && self.db_host.is_none() {
            let mut cmd = Self::command();
            cmd.error(
                ErrorKind::MissingRequiredArgument,
                "database connection required (set --database-url, DATABASE_URL, or db_host/db_name/db_user in config)",
            )
            .exit();
        }
    }

    /// Resolves the effective Postgres connection string: `database_url`
    /// when set, otherwise built from the discrete `db_*` fields.
    #[must_use]
    pub fn database_url(&self) -> String {
        if let Some(url) = &self.database_url {
            return url.clone();
        }

        let host = self.db_host.as_deref().unwrap_or("localhost");
        let port = self.db_port.unwrap_or(5432);
        let name = self.db_name.as_deref().unwrap_or("tweedekamer");
        let user = self.db_user.as_deref().unwrap_or("postgres");
        let password = self.db_password.as_deref().unwrap_or("");

        format!("postgres://{user}:{password}@{host}:{port}/{name}")
    }
}
