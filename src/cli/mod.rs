//! CLI module for the user traits service
//!
//! Startup flags are the highest-precedence configuration source; see
//! [`crate::config::AppConfig::load_with_overrides`].

pub mod serve;

use std::ffi::OsString;
use std::path::Path;

use clap::{Parser, ValueEnum};

use crate::config::{ConfigOverrides, StorageBackend};

/// User traits service - user records with exactly-once creation
#[derive(Parser, Debug)]
#[command(name = "user-traits")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Server port
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// PSQL connection string
    #[arg(long = "postgresql", env = "DATABASE_URL")]
    pub postgresql: Option<String>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// User store backend
    #[arg(long, value_enum)]
    pub storage: Option<StorageArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageArg {
    Postgres,
    Memory,
}

impl From<StorageArg> for StorageBackend {
    fn from(arg: StorageArg) -> Self {
        match arg {
            StorageArg::Postgres => Self::Postgres,
            StorageArg::Memory => Self::Memory,
        }
    }
}

impl Cli {
    /// Load `.env` from the working directory, then parse the process arguments
    ///
    /// `.env` has to be loaded first so its `PORT` and `DATABASE_URL` reach
    /// the flag fallbacks. Variables already set in the environment win.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }

    /// Same as [`Cli::load`] with an explicit env file and argument list
    pub fn load_from<I, T>(env_file: &Path, args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        dotenvy::from_path(env_file).ok();
        Self::try_parse_from(args)
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            database_url: self.postgresql.clone(),
            backend: self.storage.map(StorageBackend::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_port_and_postgresql_flags() {
        let cli = Cli::try_parse_from([
            "user-traits",
            "--port",
            "8080",
            "--postgresql",
            "postgres://localhost/user_traits",
        ])
        .unwrap();

        let overrides = cli.overrides();
        assert_eq!(overrides.port, Some(8080));
        assert_eq!(
            overrides.database_url.as_deref(),
            Some("postgres://localhost/user_traits")
        );
    }

    #[test]
    fn test_parse_memory_backend() {
        let cli = Cli::try_parse_from(["user-traits", "--storage", "memory"]).unwrap();
        assert_eq!(cli.overrides().backend, Some(StorageBackend::Memory));
    }

    #[test]
    fn test_env_file_feeds_flag_fallbacks() {
        let port_preset = std::env::var_os("PORT").is_some();
        let url_preset = std::env::var_os("DATABASE_URL").is_some();

        let env_file = std::env::temp_dir().join(format!("user-traits-{}.env", std::process::id()));
        std::fs::write(
            &env_file,
            "PORT=39999\nDATABASE_URL=postgres://from-env-file/user_traits\n",
        )
        .unwrap();

        let cli = Cli::load_from(&env_file, ["user-traits", "--storage", "memory"]).unwrap();
        std::fs::remove_file(&env_file).ok();

        if !port_preset {
            assert_eq!(cli.port, Some(39999));
        }
        if !url_preset {
            assert_eq!(
                cli.postgresql.as_deref(),
                Some("postgres://from-env-file/user_traits")
            );
        }
    }

    #[test]
    fn test_rejects_invalid_port() {
        assert!(Cli::try_parse_from(["user-traits", "--port", "not-a-port"]).is_err());
    }
}
