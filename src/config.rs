use std::env;
use std::path::PathBuf;

use crate::error::{Result, StorefrontError};
use crate::search_history::{FileStorage, SEARCH_HISTORY_KEY};
use crate::utils::DatePattern;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
/// Directory name under the platform data dir
pub const APP_DIR_NAME: &str = "petshop-storefront";

pub const API_URL_VAR: &str = "PETSHOP_API_URL";
pub const DATA_DIR_VAR: &str = "PETSHOP_DATA_DIR";
pub const LAYOUT_VAR: &str = "PETSHOP_LAYOUT";
pub const DATE_FORMAT_VAR: &str = "PETSHOP_DATE_FORMAT";

/// Runtime configuration, read from the environment and overridden by CLI flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend base URL, without a trailing slash
    pub api_url: String,
    /// Where the search history lives
    pub data_dir: PathBuf,
    /// Layout JSON; the built-in layout is used when absent
    pub layout_path: Option<PathBuf>,
    /// Date pattern forced over the profile setting
    pub date_format: Option<DatePattern>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All optional:
    /// - `PETSHOP_API_URL`: backend base URL (default `http://127.0.0.1:8000`)
    /// - `PETSHOP_DATA_DIR`: data directory (default: platform data dir)
    /// - `PETSHOP_LAYOUT`: layout JSON file
    /// - `PETSHOP_DATE_FORMAT`: date pattern such as `%d.%m.%Y`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`Config::from_env`] with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var =
            |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_url = var(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = normalize_api_url(&api_url)?;

        let data_dir = match var(DATA_DIR_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        Ok(Self {
            api_url,
            data_dir,
            layout_path: var(LAYOUT_VAR).map(PathBuf::from),
            date_format: var(DATE_FORMAT_VAR).map(|p| DatePattern::from_profile(&p)),
        })
    }

    pub fn with_api_url(mut self, url: &str) -> Result<Self> {
        self.api_url = normalize_api_url(url)?;
        Ok(self)
    }

    pub fn history_storage(&self) -> FileStorage {
        FileStorage::new(&self.data_dir)
    }

    pub fn history_path(&self) -> PathBuf {
        self.history_storage().path_for(SEARCH_HISTORY_KEY)
    }
}

fn default_data_dir() -> Result<PathBuf> {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| StorefrontError::Config("cannot determine the local data directory".into()))
}

fn normalize_api_url(url: &str) -> Result<String> {
    let url = url.trim().trim_end_matches('/');
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(StorefrontError::Config(format!(
            "API URL must start with http:// or https://, got '{}'",
            url
        )));
    }
    Ok(url.to_string())
}
