//! Process configuration, from command-line flags with environment fallbacks.
//!
//! ```text
//! flightfinder-api --addr 127.0.0.1:8080 --environment development
//! FLIGHTFINDER_CORS_ORIGINS=https://a.example,https://b.example flightfinder-api
//! ```

use std::fmt;
use std::net::SocketAddr;

use clap::{Parser, ValueEnum};

/// Hosting environment. Only `Development` changes behaviour: detailed error
/// pages and debug-level logs by default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    Development,
    Staging,
    #[default]
    Production,
}

impl Environment {
    pub fn is_development(self) -> bool {
        self == Self::Development
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        })
    }
}

/// FlightFinder API server
#[derive(Parser, Debug, Clone)]
#[command(name = "flightfinder-api")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "FLIGHTFINDER_ADDR", default_value = "0.0.0.0:5000")]
    pub addr: SocketAddr,

    /// Hosting environment
    #[arg(long, value_enum, env = "FLIGHTFINDER_ENVIRONMENT", default_value_t = Environment::Production)]
    pub environment: Environment,

    /// Allowed CORS origin; repeat or comma-separate. None means any origin.
    #[arg(long = "cors-origin", env = "FLIGHTFINDER_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Parse command line arguments and environment.
    pub fn parse_args() -> Self {
        Config::parse()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            environment: Environment::Production,
            cors_origins: Vec::new(),
        }
    }
}
