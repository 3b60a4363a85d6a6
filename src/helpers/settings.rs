use camino::{Utf8Path, Utf8PathBuf};
use snafu::prelude::*;
use url::Url;

use std::time::Duration;

use crate::error::*;

/// Settings for reaching the user resources service.
///
/// They can be read from a TOML file, for example:
///
/// ```toml
/// api_url = "https://rettiwt.example.org/api"
/// api_key = "..."
/// proxy = "socks5://127.0.0.1:9050"
/// timeout = 5000
/// ```
///
/// Values given on the command line (or through the environment) take precedence
/// over the file, see [`Settings::merge`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub proxy: Option<String>,
    /// Request timeout in milliseconds, 0 disables it
    pub timeout: Option<u64>,
}

impl Settings {
    pub fn from_path(path: &Utf8Path) -> Result<Self, Error> {
        debug!("Loading settings from {}", path);

        let content = std::fs::read_to_string(path).context(SettingsReadSnafu {
            path: path.to_path_buf(),
        })?;

        Self::from_toml(&content, path)
    }

    fn from_toml(content: &str, path: &Utf8Path) -> Result<Self, Error> {
        toml::from_str(content).context(SettingsTomlSnafu {
            path: path.to_path_buf(),
        })
    }

    /// Load the optional settings file, then apply the overrides on top of it.
    pub fn load(path: Option<&Utf8PathBuf>, overrides: Settings) -> Result<Self, Error> {
        let base = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };

        Ok(base.merge(overrides))
    }

    /// Every value set in `other` replaces the one in `self`.
    pub fn merge(self, other: Settings) -> Self {
        Self {
            api_url: other.api_url.or(self.api_url),
            api_key: other.api_key.or(self.api_key),
            proxy: other.proxy.or(self.proxy),
            timeout: other.timeout.or(self.timeout),
        }
    }

    pub fn api_url(&self) -> Result<Url, Error> {
        let url = self.api_url.as_deref().context(SettingsNoApiUrlSnafu)?;
        Url::parse(url).context(SettingsApiUrlSnafu { url })
    }

    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout {
            None | Some(0) => None,
            Some(ms) => Some(Duration::from_millis(ms)),
        }
    }
}
