//! Connection settings.
//!
//! Settings come from three places, which can be combined:
//!
//! * [`Config::default`] - `localhost:6600`, 30 second timeout, no password
//! * [`Config::from_env`] - the `MPD_HOST`, `MPD_PORT` and `MPD_TIMEOUT`
//!   variables that other MPD clients honour as well
//! * [`Config::from_file`] - a small TOML file:
//!
//! ```toml
//! host = "music.local"
//! port = 6600
//! timeout = 2.5
//! password = "secret"
//! ```
//!
//! `MPD_HOST` may carry a password as `password@host`, and names a Unix
//! domain socket when it starts with `/`.

use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSecondsWithFrac};
use veil::Redact;

use crate::{
    error::{Error, Result},
    protocol::DEFAULT_PORT,
};

#[serde_as]
#[derive(Clone, PartialEq, Eq, Hash, Deserialize, Serialize, Redact)]
#[serde(default)]
pub struct Config {
    /// Host name, IP address or absolute path of a Unix domain socket.
    pub host: String,

    pub port: u16,

    /// Timeout of every read and write; zero waits forever.
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub timeout: Duration,

    /// Sent with `password` right after connecting.
    #[redact]
    pub password: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: Self::DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            timeout: Self::DEFAULT_TIMEOUT,
            password: None,
        }
    }
}

impl Config {
    pub const DEFAULT_HOST: &'static str = "localhost";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Configuration files are tiny; anything larger is a mistake.
    const MAX_FILE_SIZE: u64 = 4 * 1024;

    /// Settings for `host:port` with the default timeout.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// Defaults overridden by `MPD_HOST`, `MPD_PORT` and `MPD_TIMEOUT`.
    ///
    /// Values that cannot be parsed are skipped with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = var("MPD_HOST").filter(|host| !host.is_empty()) {
            config.set_host(&host);
        }

        if let Some(port) = var("MPD_PORT") {
            match port.parse() {
                Ok(port) => config.port = port,
                Err(e) => warn!("ignoring MPD_PORT {port}: {e}"),
            }
        }

        if let Some(timeout) = var("MPD_TIMEOUT") {
            match timeout
                .parse::<f64>()
                .map_err(|e| e.to_string())
                .and_then(|secs| Duration::try_from_secs_f64(secs).map_err(|e| e.to_string()))
            {
                Ok(timeout) => config.timeout = timeout,
                Err(e) => warn!("ignoring MPD_TIMEOUT {timeout}: {e}"),
            }
        }

        config
    }

    /// Sets the host, splitting off a `password@` prefix.
    fn set_host(&mut self, host: &str) {
        if !host.starts_with('/') {
            if let Some((password, host)) = host.rsplit_once('@') {
                if !password.is_empty() {
                    self.password = Some(password.to_owned());
                }
                host.clone_into(&mut self.host);
                return;
            }
        }
        host.clone_into(&mut self.host);
    }

    /// Reads settings from a TOML file; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// * [`Argument`](crate::error::ErrorKind::Argument) if the file is over
    ///   4 KiB or is not valid TOML
    /// * an I/O kind if the file cannot be read
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Prevent out-of-memory condition: configuration files should be small.
        let file_size = fs::metadata(path)?.len();
        if file_size > Self::MAX_FILE_SIZE {
            return Err(Error::argument(format!(
                "{} is too large ({file_size} bytes)",
                path.display()
            )));
        }

        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        debug!("loaded configuration from {}", path.display());

        Ok(config)
    }
}
