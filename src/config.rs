use std::{env, path::PathBuf};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_file: PathBuf,
    pub log_dir: PathBuf,
    pub probe_bytes: usize,
    pub verify_order: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid SERVER_PORT: {err}")))?;

        let log_file = PathBuf::from(
            env::var("LOGSPAN_LOG_FILE")
                .map_err(|_| AppError::Config("missing LOGSPAN_LOG_FILE".into()))?,
        );

        let log_dir = PathBuf::from(env::var("LOGSPAN_LOG_DIR").unwrap_or_else(|_| "../log".into()));

        // 200 bytes comfortably captures one full line on either end.
        let probe_bytes: usize = env::var("LOGSPAN_PROBE_BYTES")
            .unwrap_or_else(|_| "200".into())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid LOGSPAN_PROBE_BYTES: {err}")))?;

        let verify_order = env::var("LOGSPAN_VERIFY_ORDER")
            .unwrap_or_else(|_| "false".into())
            .parse::<bool>()
            .map_err(|err| AppError::Config(format!("invalid LOGSPAN_VERIFY_ORDER: {err}")))?;

        Ok(Self {
            host,
            port,
            log_file,
            log_dir,
            probe_bytes,
            verify_order,
        })
    }
}
