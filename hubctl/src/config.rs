//! Client configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable overrides. The
//! configuration file path defaults to `hubctl.yaml` but can be specified via `-f` flag or
//! `HUBCTL_CONFIG` environment variable. A missing file is not an error; every field has a
//! default.
//!
//! ## Loading Priority
//!
//! Configuration sources are merged in the following order (later sources override earlier ones):
//!
//! 1. **YAML config file** - Base configuration (default: `hubctl.yaml`)
//! 2. **Environment variables** - Variables prefixed with `HUBCTL_` override YAML values
//! 3. **Command-line flags** - `--api-url` and `--actor`
//!
//! For nested config values, use double underscores in environment variables. For example,
//! `HUBCTL_API__BASE_URL=http://implanthub:8000/api/` sets the `api.base_url` field.
//!
//! ## Example
//!
//! ```yaml
//! api:
//!   base_url: http://localhost:8000/
//!   request_timeout: 15s
//! actor_user_id: 3
//! default_template:
//!   name: Implantação padrão
//! log_level: info
//! ```

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::cli::Command;
use crate::errors::Error;
use crate::provisioner::{DEFAULT_TEMPLATE_DESCRIPTION, DEFAULT_TEMPLATE_NAME};
use crate::types::UserId;

/// Command-line arguments: config location, per-invocation overrides and the command to run.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "HUBCTL_CONFIG", default_value = "hubctl.yaml", global = true)]
    pub config: String,

    /// Act as this user id (sent as X-User-Id on changes); overrides `actor_user_id`
    #[arg(long, global = true)]
    pub actor: Option<UserId>,

    /// API base URL; overrides `api.base_url`
    #[arg(long, global = true)]
    pub api_url: Option<Url>,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where the API lives and how long to wait for it
    pub api: ApiConfig,
    /// User id recorded as the author of every change. Unset means no author is recorded.
    pub actor_user_id: Option<UserId>,
    /// The template every new project is created from
    pub default_template: DefaultTemplateConfig,
    /// Default tracing filter when `RUST_LOG` is not set
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    pub base_url: Url,
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("http://localhost:8000/").expect("static URL is valid"),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultTemplateConfig {
    /// Looked up case- and whitespace-insensitively before creating anything
    pub name: String,
    pub description: String,
}

impl Default for DefaultTemplateConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_TEMPLATE_NAME.to_string(),
            description: DEFAULT_TEMPLATE_DESCRIPTION.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            actor_user_id: None,
            default_template: DefaultTemplateConfig::default(),
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let mut config: Self = Self::figment(args).extract()?;

        if let Some(actor) = args.actor {
            config.actor_user_id = Some(actor);
        }
        if let Some(url) = &args.api_url {
            config.api.base_url = url.clone();
        }

        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            // Load base config file
            .merge(Yaml::file(&args.config))
            // Environment variables override file values; HUBCTL_CONFIG names the file itself
            .merge(Env::prefixed("HUBCTL_").ignore(&["config"]).split("__"))
    }

    /// Validate the configuration for consistency and required fields
    pub fn validate(&self) -> Result<(), Error> {
        if self.default_template.name.trim().is_empty() {
            return Err(Error::validation("Config validation: default_template.name cannot be blank"));
        }
        if self.api.request_timeout.is_zero() {
            return Err(Error::validation("Config validation: api.request_timeout must be greater than zero"));
        }
        if !matches!(self.api.base_url.scheme(), "http" | "https") {
            return Err(Error::validation(format!(
                "Config validation: api.base_url must be http or https, got '{}'",
                self.api.base_url.scheme()
            )));
        }
        Ok(())
    }
}
