use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub password: String,
    pub secret_key: String,
    pub session_ttl_hours: u64,
    pub api_base_url: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    #[serde(default)]
    server: ServerSection,
    #[serde(default)]
    database: DatabaseSection,
    #[serde(default)]
    auth: AuthSection,
    #[serde(default)]
    api: ApiSection,
}

#[derive(Debug, Deserialize)]
struct ServerSection {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DatabaseSection {
    #[serde(default = "default_database_url")]
    url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct AuthSection {
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    secret_key: Option<String>,
    #[serde(default)]
    session_ttl_hours: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct ApiSection {
    #[serde(default)]
    base_url: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_database_url() -> String {
    "wishlist.redb".to_string()
}

fn default_session_ttl_hours() -> u64 {
    24 * 30
}

impl ServerConfig {
    /// Load from `WISHLIST_SERVER_CONFIG` or `./server.toml` when present,
    /// otherwise from the environment (after reading `.env`).
    pub fn load() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let lookup = |name: &str| env::var(name).ok();

        if let Some(file_config) = load_from_file()? {
            return Self::from_file(file_config, lookup);
        }

        Self::from_lookup(lookup)
    }

    /// Build the config from environment-style variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = lookup("WISHLIST_HOST").unwrap_or_else(default_host);
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or_else(default_port);
        let database_url = lookup("DATABASE_URL").unwrap_or_else(default_database_url);
        let session_ttl_hours = session_ttl(
            lookup("WISHLIST_SESSION_TTL_HOURS")
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or_else(default_session_ttl_hours),
        )?;

        Ok(Self {
            host,
            port,
            database_path: database_path(&database_url),
            password: required(lookup("WISHLIST_PASSWORD"), "WISHLIST_PASSWORD")?,
            secret_key: required(lookup("SECRET_KEY"), "SECRET_KEY")?,
            session_ttl_hours,
            api_base_url: non_empty(lookup("WISHLIST_API_URL")),
        })
    }

    /// Secrets missing from the file fall back to the environment.
    fn from_file(
        file_config: FileConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let FileConfig {
            server,
            database,
            auth,
            api,
        } = file_config;

        Ok(Self {
            host: server.host,
            port: server.port,
            database_path: database_path(&database.url),
            password: required(
                auth.password.or_else(|| lookup("WISHLIST_PASSWORD")),
                "auth.password",
            )?,
            secret_key: required(
                auth.secret_key.or_else(|| lookup("SECRET_KEY")),
                "auth.secret_key",
            )?,
            session_ttl_hours: session_ttl(
                auth.session_ttl_hours
                    .unwrap_or_else(default_session_ttl_hours),
            )?,
            api_base_url: non_empty(api.base_url.or_else(|| lookup("WISHLIST_API_URL"))),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn database_path(url: &str) -> PathBuf {
    PathBuf::from(url.strip_prefix("redb://").unwrap_or(url))
}

// A zero lifetime would issue sessions that expire on arrival
fn session_ttl(hours: u64) -> anyhow::Result<u64> {
    if hours == 0 {
        anyhow::bail!("Session lifetime must be at least one hour");
    }
    Ok(hours)
}

fn required(value: Option<String>, name: &str) -> anyhow::Result<String> {
    non_empty(value).ok_or_else(|| anyhow::anyhow!("Missing required setting {}", name))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn load_from_file() -> anyhow::Result<Option<FileConfig>> {
    let config_path = env::var("WISHLIST_SERVER_CONFIG").ok();
    let path = if let Some(path) = config_path {
        Some(path)
    } else if Path::new("server.toml").exists() {
        Some("server.toml".to_string())
    } else {
        None
    };

    let Some(path) = path else {
        return Ok(None);
    };

    let contents = fs::read_to_string(&path)
        .map_err(|err| anyhow::anyhow!("Failed to read config {}: {}", path, err))?;
    parse_file_config(&contents)
        .map(Some)
        .map_err(|err| anyhow::anyhow!("Failed to parse config {}: {}", path, err))
}

fn parse_file_config(contents: &str) -> Result<FileConfig, toml::de::Error> {
    toml::from_str(contents)
}
