use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ToddError;
use crate::service::DEFAULT_HISTORY_WINDOW;
use crate::session::SessionMode;

pub const DEFAULT_INFERENCE_URL: &str =
    "https://api-inference.huggingface.co/models/tiiuae/falcon-7b-instruct";

#[derive(Debug, Clone)]
pub struct Config {
    pub hf_token: String,
    pub hf_api_url: String,
    pub bind_addr: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub pledge_url: String,
    pub session_mode: SessionMode,
    pub session_ttl: Duration,
    pub history_window: usize,
    pub remote_timeout: Option<Duration>,
    pub transcript_log: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, ToddError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading through `lookup` so tests don't have to
    /// touch the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ToddError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let hf_token = var("HF_TOKEN").unwrap_or_default();
        let hf_api_url = var("HF_API_URL").unwrap_or_else(|| DEFAULT_INFERENCE_URL.to_string());
        let bind_addr = var("TODD_BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(var("PORT"), "PORT", 3000)?;
        let static_dir = PathBuf::from(var("TODD_STATIC_DIR").unwrap_or_else(|| "public".to_string()));
        let pledge_url = var("TODD_PLEDGE_URL").unwrap_or_else(|| "/pledge.html".to_string());
        let session_mode = match var("TODD_SESSION_MODE") {
            Some(mode) => mode.parse()?,
            None => SessionMode::PerSession,
        };
        let ttl_mins: u64 = parse_or(var("TODD_SESSION_TTL_MINS"), "TODD_SESSION_TTL_MINS", 60)?;
        let history_window = parse_or(var("TODD_HISTORY_WINDOW"), "TODD_HISTORY_WINDOW", DEFAULT_HISTORY_WINDOW)?;
        let remote_timeout = var("TODD_REMOTE_TIMEOUT_SECS")
            .map(|v| parse_value::<u64>(&v, "TODD_REMOTE_TIMEOUT_SECS"))
            .transpose()?
            .map(Duration::from_secs);
        let transcript_log = var("TODD_TRANSCRIPT_LOG").map(PathBuf::from);

        Ok(Self {
            hf_token,
            hf_api_url,
            bind_addr,
            port,
            static_dir,
            pledge_url,
            session_mode,
            session_ttl: Duration::from_secs(ttl_mins.saturating_mul(60)),
            history_window,
            remote_timeout,
            transcript_log,
        })
    }
}

fn parse_value<T: FromStr>(raw: &str, key: &str) -> Result<T, ToddError> {
    raw.trim()
        .parse()
        .map_err(|_| ToddError::Config(format!("{key} has invalid value '{raw}'")))
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &str, default: T) -> Result<T, ToddError> {
    match raw {
        Some(v) => parse_value(&v, key),
        None => Ok(default),
    }
}
