//! Server configuration read from the command line and the environment.

use std::{
    fmt::Display,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use clap::Parser;
use rusqlite::Connection;

/// The REST API server for the finance backend.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Where the SQLite database lives: a file path, `sqlite:<path>`,
    /// `sqlite://<path>` or `:memory:`.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// The address to listen on.
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,
}

impl Config {
    /// The socket address the server should bind to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Parse [Config::database_url] into a [StoreLocation].
    pub fn store_location(&self) -> StoreLocation {
        StoreLocation::parse(&self.database_url)
    }
}

/// Where the database is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// A private database that lives only as long as its connection.
    InMemory,
    /// A database file on disk, created if it does not exist.
    File(PathBuf),
}

impl StoreLocation {
    /// Interpret a connection string.
    ///
    /// The `sqlite://` and `sqlite:` prefixes are optional, and `:memory:`
    /// selects an in-memory database.
    pub fn parse(database_url: &str) -> Self {
        let path = database_url
            .strip_prefix("sqlite://")
            .or_else(|| database_url.strip_prefix("sqlite:"))
            .unwrap_or(database_url);

        match path {
            ":memory:" | "" => StoreLocation::InMemory,
            path => StoreLocation::File(PathBuf::from(path)),
        }
    }

    /// Open a connection to the database.
    ///
    /// # Errors
    /// Returns an error if the database file cannot be opened or created.
    pub fn open(&self) -> Result<Connection, rusqlite::Error> {
        match self {
            StoreLocation::InMemory => Connection::open_in_memory(),
            StoreLocation::File(path) => Connection::open(path),
        }
    }
}

impl Display for StoreLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreLocation::InMemory => write!(f, ":memory:"),
            StoreLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}
