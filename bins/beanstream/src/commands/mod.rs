//! CLI command implementations

pub mod pay;
pub mod profile;

use anyhow::{Context as _, Result};
use beanstream_client::observer::TracingObserver;
use beanstream_client::{BeanstreamClient, Configuration};
use clap::ValueEnum;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Options shared by every command
pub struct Context {
    pub config: Option<PathBuf>,
    pub verbose: bool,
    pub format: OutputFormat,
}

impl Context {
    /// Build a client from `--config` or the environment
    pub fn client(&self) -> Result<BeanstreamClient> {
        let config = match &self.config {
            Some(path) => Configuration::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => Configuration::from_env()?,
        };

        let client = BeanstreamClient::new(config)?;
        Ok(if self.verbose {
            client.with_observer(Arc::new(TracingObserver))
        } else {
            client
        })
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}

/// Print a value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
