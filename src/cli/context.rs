//! Command execution context
//!
//! Loads configuration once and builds the API client, reconciler and state
//! store on demand, so commands that only touch state never need credentials.

use std::sync::Arc;

use log::debug;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::ForgejoClient;
use crate::config::Config;
use crate::error::Result;
use crate::orchestrator::Orchestrator;
use crate::state::StateStore;
use crate::team::Reconciler;

pub struct CommandContext {
    /// Config file merged with flag and environment overrides
    pub config: Config,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let mut config = Config::load(opts.config_ref())?;
        config.apply_overrides(opts.overrides());

        Ok(Self {
            config,
            format: opts.format,
        })
    }

    /// Authenticated API client for the configured instance.
    pub fn client(&self) -> Result<Arc<ForgejoClient>> {
        let url = self.config.base_url()?;
        let credentials = self.config.credentials()?;
        debug!("Using Forgejo instance at {}", url);

        let client = ForgejoClient::new(&url, credentials, self.config.timeout())?;
        Ok(Arc::new(client))
    }

    pub fn reconciler(&self) -> Result<Reconciler<ForgejoClient>> {
        Ok(Reconciler::new(self.client()?).with_timeout(self.config.timeout()))
    }

    pub fn orchestrator(&self, parallelism: usize) -> Result<Orchestrator<ForgejoClient>> {
        Ok(Orchestrator::new(self.reconciler()?).with_parallelism(parallelism))
    }

    /// Open the state database, creating it if needed.
    pub fn store(&self) -> Result<StateStore> {
        let path = self.config.state_path()?;
        debug!("Opening state at {}", path.display());
        Ok(StateStore::open(&path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, Error};
    use tempfile::TempDir;

    fn opts(dir: &TempDir) -> GlobalOptions {
        let config = dir.path().join("config.yaml");
        std::fs::write(&config, "timeout_secs: 3\n").unwrap();

        GlobalOptions {
            format: OutputFormat::Table,
            config: Some(config),
            url: Some("https://forgejo.example.com".to_string()),
            token: None,
            state: Some(dir.path().join("state.db")),
        }
    }

    #[test]
    fn test_state_commands_need_no_credentials() {
        let dir = TempDir::new().unwrap();
        let ctx = CommandContext::new(&opts(&dir)).unwrap();

        let store = ctx.store().unwrap();
        assert!(store.list().unwrap().is_empty());
        assert!(dir.path().join("state.db").exists());
    }

    #[test]
    fn test_client_requires_credentials() {
        let dir = TempDir::new().unwrap();
        let ctx = CommandContext::new(&opts(&dir)).unwrap();

        let err = ctx.client().err().unwrap();
        assert!(matches!(err, Error::Config(ConfigError::MissingCredentials)));
    }

    #[test]
    fn test_token_override_enables_client() {
        let dir = TempDir::new().unwrap();
        let mut opts = opts(&dir);
        opts.token = Some("secret".to_string());

        let ctx = CommandContext::new(&opts).unwrap();
        assert_eq!(ctx.config.timeout().as_secs(), 3);
        assert!(ctx.orchestrator(2).is_ok());
    }
}
