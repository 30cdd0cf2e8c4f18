//! Handles settings for the application. Configuration is read from
//! `settings.toml` and can be overridden entry by entry with
//! `OUTLAY_`-prefixed environment variables (`OUTLAY_SERVER__PORT=8080`).
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Server {
    pub address: Option<String>,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite { path: String },
}

impl Database {
    pub fn url(&self) -> String {
        match self {
            Database::Memory => String::from("sqlite::memory:"),
            Database::Sqlite { path } => format!("sqlite:{path}?mode=rwc"),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Policy {
    /// Also delete expenditures when their project or category is deleted.
    #[serde(default)]
    pub cascade_expenditures: bool,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub server: Server,
    pub database: Database,
    #[serde(default)]
    pub policy: Policy,
}

fn default_log_level() -> String {
    String::from("info")
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("OUTLAY").separator("__"))
            .set_default("server.address", "127.0.0.1")?
            .set_default("server.port", 3000_i64)?
            .set_default("database.kind", "memory")?
            .build()?;

        settings.try_deserialize()
    }
}
