/// Store connection configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite URL of the automation application's database file.
    pub database_url: String,
    /// Pool size (default: `5`).
    pub max_connections: u32,
    /// How long a statement waits on a lock held by the external engine
    /// before failing (default: `5000`).
    pub busy_timeout_ms: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum DbConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

impl DbConfig {
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
    pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

    /// Configuration with defaults for everything but the URL.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: Self::DEFAULT_MAX_CONNECTIONS,
            busy_timeout_ms: Self::DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// | Env Var              | Default  |
    /// |----------------------|----------|
    /// | `DATABASE_URL`       | required |
    /// | `DB_MAX_CONNECTIONS` | `5`      |
    /// | `DB_BUSY_TIMEOUT_MS` | `5000`   |
    pub fn from_env() -> Result<Self, DbConfigError> {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| DbConfigError::Missing("DATABASE_URL"))?;

        let max_connections =
            parse_var("DB_MAX_CONNECTIONS", Self::DEFAULT_MAX_CONNECTIONS)?;
        let busy_timeout_ms =
            parse_var("DB_BUSY_TIMEOUT_MS", Self::DEFAULT_BUSY_TIMEOUT_MS)?;

        Ok(Self {
            database_url,
            max_connections,
            busy_timeout_ms,
        })
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, DbConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| DbConfigError::Invalid { var, value }),
        Err(_) => Ok(default),
    }
}
