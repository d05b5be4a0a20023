use std::net::{AddrParseError, SocketAddr};

pub const LISTEN_ADDR_VAR: &str = "DASHBOARD_LISTEN_ADDR";
pub const TITLE_VAR: &str = "DASHBOARD_TITLE";
pub const NAME_FILTER_VAR: &str = "DASHBOARD_NAME_FILTER";

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TITLE: &str = "Containers";
const DEFAULT_NAME_FILTER: &str = "mc-";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid listen address `{value}` in `{var}`: {source}")]
    InvalidListenAddr {
        var: &'static str,
        value: String,
        #[source]
        source: AddrParseError,
    },
    #[error("`{0}` must not be empty")]
    Empty(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Runtime configuration of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub listen_addr: SocketAddr,
    /// Title shown on the dashboard page.
    pub title: String,
    /// Substring a container name must contain to be shown.
    pub name_filter: String,
}

impl Config {
    /// Reads the configuration from the environment, after loading `.env` from the working
    /// directory if present.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("Loaded environment from `{}`", path.display()),
            Err(err) if err.not_found() => {}
            Err(err) => log::warn!("Failed to load .env file: {}", err),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup. Unset variables fall back
    /// to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an invalid value.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dockdash::config::Config;
    /// let config = Config::from_lookup(|key| match key {
    ///     "DASHBOARD_LISTEN_ADDR" => Some(":9000".to_owned()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.listen_addr.port(), 9000);
    /// assert_eq!(config.name_filter, "mc-");
    /// ```
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let listen_addr =
            lookup(LISTEN_ADDR_VAR).unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_owned());
        let listen_addr = parse_listen_addr(listen_addr.trim())?;

        let title = lookup(TITLE_VAR).unwrap_or_else(|| DEFAULT_TITLE.to_owned());

        let name_filter =
            lookup(NAME_FILTER_VAR).unwrap_or_else(|| DEFAULT_NAME_FILTER.to_owned());
        if name_filter.is_empty() {
            return Err(Error::Empty(NAME_FILTER_VAR));
        }

        Ok(Self {
            listen_addr,
            title,
            name_filter,
        })
    }
}

/// Parses `host:port`, or `:port` meaning all interfaces.
fn parse_listen_addr(value: &str) -> Result<SocketAddr> {
    let full = match value.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{port}"),
        None => value.to_owned(),
    };
    full.parse().map_err(|source| Error::InvalidListenAddr {
        var: LISTEN_ADDR_VAR,
        value: value.to_owned(),
        source,
    })
}
