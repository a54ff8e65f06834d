use std::{collections::HashMap, path::PathBuf};

#[derive(Debug, ::thiserror::Error)]
pub enum ConfigError {
    #[error("DATABASE_URL is not set")]
    DatabaseUrlIsNotSet,
    #[error("`{key}` has invalid value `{value}`")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub port: u16,
    pub workers: usize,
    /// каталог, куда сохраняются загруженные файлы
    pub uploads_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// ключ подписи cookie-сессии в base64
    pub session_key: Option<String>,
}

impl Config {
    pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Result<Self, ConfigError> {
        let mut vars = vars.into_iter().collect::<HashMap<_, _>>();

        let database_url = vars
            .remove("DATABASE_URL")
            .ok_or(ConfigError::DatabaseUrlIsNotSet)?;

        Ok(Self {
            database_url,
            bind_addr: vars
                .remove("BIND_ADDR")
                .unwrap_or_else(|| String::from("0.0.0.0")),
            port: parse(&mut vars, "PORT", 8080)?,
            workers: parse_nonzero(&mut vars, "WORKERS", 2)?,
            uploads_dir: vars
                .remove("UPLOADS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./uploads")),
            max_upload_bytes: parse(
                &mut vars,
                "MAX_UPLOAD_BYTES",
                Self::DEFAULT_MAX_UPLOAD_BYTES,
            )?,
            session_key: vars.remove("SESSION_KEY"),
        })
    }
}

fn parse<T: std::str::FromStr>(
    vars: &mut HashMap<String, String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match vars.remove(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}

fn parse_nonzero(
    vars: &mut HashMap<String, String>,
    key: &'static str,
    default: usize,
) -> Result<usize, ConfigError> {
    match parse(vars, key, default)? {
        0 => Err(ConfigError::InvalidValue {
            key,
            value: String::from("0"),
        }),
        n => Ok(n),
    }
}
