use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const LISTEN_ADDR_ENV: &str = "SHORTLINK_LISTEN_ADDR";
pub const PUBLIC_BASE_URL_ENV: &str = "SHORTLINK_PUBLIC_BASE_URL";
pub const STORAGE_BACKEND_ENV: &str = "SHORTLINK_STORAGE_BACKEND";
pub const POSTGRES_HOST_ENV: &str = "SHORTLINK_POSTGRES_HOST";
pub const POSTGRES_PORT_ENV: &str = "SHORTLINK_POSTGRES_PORT";
pub const POSTGRES_USER_ENV: &str = "SHORTLINK_POSTGRES_USER";
pub const POSTGRES_PASSWORD_ENV: &str = "SHORTLINK_POSTGRES_PASSWORD";
pub const POSTGRES_DB_ENV: &str = "SHORTLINK_POSTGRES_DB";
pub const POOL_SIZE_ENV: &str = "SHORTLINK_POOL_SIZE";
pub const POOL_ACQUIRE_TIMEOUT_ENV: &str = "SHORTLINK_POOL_ACQUIRE_TIMEOUT_SECS";
pub const CODE_LENGTH_ENV: &str = "SHORTLINK_CODE_LENGTH";
pub const MAX_ATTEMPTS_ENV: &str = "SHORTLINK_MAX_ATTEMPTS";
pub const LOG_FORMAT_ENV: &str = "SHORTLINK_LOG_FORMAT";
pub const LOG_FILE_ENV: &str = "SHORTLINK_LOG_FILE";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "postgres")]
    Postgres,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Postgres => write!(f, "postgres"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "shortlink", about = "Link shortening HTTP service")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Origin prepended to codes in create responses.
    #[arg(long, env = PUBLIC_BASE_URL_ENV, default_value = DEFAULT_PUBLIC_BASE_URL)]
    pub public_base_url: String,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    /// Shorthand for `--storage postgres`.
    #[arg(long)]
    pub postgres: bool,

    #[arg(long, env = POSTGRES_HOST_ENV, default_value = "localhost")]
    pub postgres_host: String,

    #[arg(long, env = POSTGRES_PORT_ENV, default_value_t = 5432)]
    pub postgres_port: u16,

    #[arg(long, env = POSTGRES_USER_ENV, default_value = "postgres")]
    pub postgres_user: String,

    #[arg(long, env = POSTGRES_PASSWORD_ENV, default_value = "", hide_env_values = true)]
    pub postgres_password: String,

    #[arg(long, env = POSTGRES_DB_ENV, default_value = "shortlink")]
    pub postgres_db: String,

    /// Upper bound on pooled database connections.
    #[arg(long, env = POOL_SIZE_ENV, default_value_t = 100)]
    pub pool_size: u32,

    #[arg(long, env = POOL_ACQUIRE_TIMEOUT_ENV, default_value_t = 5)]
    pub pool_acquire_timeout_secs: u64,

    #[arg(long, env = CODE_LENGTH_ENV, default_value_t = 10)]
    pub code_length: usize,

    /// Candidate codes tried per create before giving up.
    #[arg(long, env = MAX_ATTEMPTS_ENV, default_value_t = 5)]
    pub max_attempts: usize,

    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormatArg::Text)]
    pub log_format: LogFormatArg,

    /// Write logs to this file instead of stdout.
    #[arg(long, env = LOG_FILE_ENV)]
    pub log_file: Option<PathBuf>,
}

impl CLI {
    /// The backend to run with, after applying `--postgres`.
    pub fn storage_backend(&self) -> StorageBackendArg {
        if self.postgres {
            StorageBackendArg::Postgres
        } else {
            self.storage
        }
    }
}
