//! Configuration settings for JobDash
//!
//! Defines the CLI arguments, their environment fallbacks and the
//! validated settings built from them.

use clap::{Args, Parser, Subcommand};
use std::time::Duration;

use crate::api::{ApiServerConfig, DEFAULT_PORT};
use crate::client::DEFAULT_API_URL;
use crate::dashboard::StalePolicy;
use crate::error::{DashError, Result};

/// JobDash - read-only job tracker data service and terminal dashboard
#[derive(Parser, Debug, Clone)]
#[command(name = "jobdash")]
#[command(author = "JobDash Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Read-only job tracker data service and terminal dashboard")]
#[command(long_about = r#"
JobDash serves four MongoDB collections (users, customers, jobs, pipelines)
over a read-only REST API and shows them in a terminal dashboard behind a
mock login.

Examples:
  MONGODB_URI=mongodb://localhost:27017/tracker jobdash serve
  jobdash dashboard --api-url http://localhost:5500/api
  jobdash snapshot --identity alice
"#)]
pub struct CliArgs {
    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the data service
    #[command(name = "serve")]
    Serve {
        /// MongoDB connection string
        #[arg(long, env = "MONGODB_URI", hide_env_values = true)]
        mongodb_uri: Option<String>,
        /// Listen port
        #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
        /// Database to serve (defaults to the one named in the URI)
        #[arg(long)]
        database: Option<String>,
    },

    /// Run the interactive terminal dashboard
    #[command(name = "dashboard")]
    Dashboard {
        #[command(flatten)]
        client: ClientArgs,
    },

    /// Log in once, wait for all resources and print the dashboard
    #[command(name = "snapshot")]
    Snapshot {
        /// Identity to log in with
        #[arg(long, default_value = "snapshot")]
        identity: String,
        #[command(flatten)]
        client: ClientArgs,
    },
}

/// Options shared by the dashboard front ends
#[derive(Args, Debug, Clone)]
pub struct ClientArgs {
    /// Data service API base URL
    #[arg(long, env = "JOBDASH_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// What to do with results that arrive after their session ended
    #[arg(long, value_enum, default_value = "discard")]
    pub stale_policy: StalePolicy,

    /// Per-request timeout (e.g. 5s, 500ms); none by default
    #[arg(long, value_name = "DURATION")]
    pub timeout: Option<String>,
}

/// Validated data service settings
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// MongoDB connection string
    pub mongodb_uri: String,
    /// Database override
    pub database: Option<String>,
    /// HTTP listener settings
    pub server: ApiServerConfig,
}

impl ServiceConfig {
    /// Build service settings; a missing or blank URI is fatal
    pub fn new(
        mongodb_uri: Option<String>,
        port: u16,
        bind: impl Into<String>,
        database: Option<String>,
    ) -> Result<Self> {
        let mongodb_uri = mongodb_uri
            .map(|uri| uri.trim().to_string())
            .filter(|uri| !uri.is_empty())
            .ok_or(DashError::MissingConnectionString)?;

        Ok(Self {
            mongodb_uri,
            database: database.filter(|name| !name.trim().is_empty()),
            server: ApiServerConfig {
                bind: bind.into(),
                port,
                ..Default::default()
            },
        })
    }
}

/// Validated dashboard settings
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Data service API base URL
    pub api_url: String,
    /// Stale completion handling
    pub stale_policy: StalePolicy,
    /// Per-request timeout
    pub timeout: Option<Duration>,
}

impl DashboardConfig {
    /// Build dashboard settings from CLI arguments
    pub fn from_cli(args: &ClientArgs) -> Result<Self> {
        let api_url = args.api_url.trim();
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(DashError::config(format!(
                "API URL must start with http:// or https://: {api_url}"
            )));
        }

        Ok(Self {
            api_url: api_url.to_string(),
            stale_policy: args.stale_policy,
            timeout: args.timeout.as_deref().map(parse_timeout).transpose()?,
        })
    }
}

/// Parse a human-readable duration such as `5s` or `250ms`
pub fn parse_timeout(value: &str) -> Result<Duration> {
    let duration = humantime::parse_duration(value.trim())
        .map_err(|e| DashError::config(format!("Invalid timeout '{value}': {e}")))?;

    if duration.is_zero() {
        return Err(DashError::config("Timeout must be greater than zero"));
    }
    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("5s").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_timeout("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_timeout(" 1m ").unwrap(), Duration::from_secs(60));
        assert!(parse_timeout("0s").is_err());
        assert!(parse_timeout("soon").is_err());
    }

    #[test]
    fn test_missing_connection_string() {
        let err = ServiceConfig::new(None, 5500, "0.0.0.0", None).unwrap_err();
        assert!(matches!(err, DashError::MissingConnectionString));

        let err = ServiceConfig::new(Some("  ".into()), 5500, "0.0.0.0", None).unwrap_err();
        assert!(matches!(err, DashError::MissingConnectionString));
    }

    #[test]
    fn test_service_config() {
        let config = ServiceConfig::new(
            Some("mongodb://localhost:27017/tracker".into()),
            8080,
            "127.0.0.1",
            Some(String::new()),
        )
        .unwrap();

        assert_eq!(config.mongodb_uri, "mongodb://localhost:27017/tracker");
        assert_eq!(config.database, None);
        assert_eq!(config.server.address(), "127.0.0.1:8080");
        assert!(config.server.cors_enabled);
    }

    #[test]
    fn test_parse_serve_args() {
        let args = CliArgs::try_parse_from([
            "jobdash",
            "serve",
            "--mongodb-uri",
            "mongodb://db:27017/tracker",
            "--port",
            "6000",
        ])
        .unwrap();

        match args.command {
            Commands::Serve {
                mongodb_uri, port, bind, ..
            } => {
                assert_eq!(mongodb_uri.as_deref(), Some("mongodb://db:27017/tracker"));
                assert_eq!(port, 6000);
                assert_eq!(bind, "0.0.0.0");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_snapshot_args() {
        let args = CliArgs::try_parse_from([
            "jobdash",
            "-v",
            "snapshot",
            "--identity",
            "alice",
            "--api-url",
            "http://svc:5500/api",
            "--stale-policy",
            "apply",
            "--timeout",
            "2s",
        ])
        .unwrap();

        assert_eq!(args.verbose, 1);
        let Commands::Snapshot { identity, client } = args.command else {
            panic!("expected snapshot");
        };
        assert_eq!(identity, "alice");

        let config = DashboardConfig::from_cli(&client).unwrap();
        assert_eq!(config.api_url, "http://svc:5500/api");
        assert_eq!(config.stale_policy, StalePolicy::Apply);
        assert_eq!(config.timeout, Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_rejects_non_http_api_url() {
        let client = ClientArgs {
            api_url: "localhost:5500/api".into(),
            stale_policy: StalePolicy::Discard,
            timeout: None,
        };
        assert!(DashboardConfig::from_cli(&client).is_err());
    }
}
