//! System setup and context construction

use pkgprobe_catalog::Catalog;
use pkgprobe_config::Config;
use pkgprobe_events::EventSender;
use pkgprobe_net::{NetClient, NetConfig};
use pkgprobe_ops::{OpsContextBuilder, OpsCtx};
use pkgprobe_state::VerificationStore;
use pkgprobe_verify::VerifierRegistry;
use std::path::PathBuf;

use crate::error::CliError;

/// Builds the operations context from configuration
pub struct SystemSetup {
    config: Config,
    catalog_override: Option<PathBuf>,
}

impl SystemSetup {
    #[must_use]
    pub fn new(config: Config, catalog_override: Option<PathBuf>) -> Self {
        Self {
            config,
            catalog_override,
        }
    }

    /// Construct the operations context
    ///
    /// The catalog is loaded only when the command needs it; contexts for
    /// administrative commands skip it so a missing catalog file does not
    /// block flag maintenance.
    pub async fn build_context(
        &self,
        tx: EventSender,
        needs_catalog: bool,
    ) -> Result<OpsCtx, CliError> {
        let client = NetClient::new(NetConfig::from_config(&self.config.network))
            .map_err(|e| CliError::Setup(e.to_string()))?;

        let registry = VerifierRegistry::new(&self.config.registries);

        let store = VerificationStore::new(&self.config.storage.db_path)
            .await
            .map_err(|e| CliError::Setup(e.to_string()))?;

        let mut builder = OpsContextBuilder::new()
            .with_registry(registry)
            .with_client(client)
            .with_store(store)
            .with_event_sender(tx)
            .with_config(self.config.clone());

        if needs_catalog {
            let path = self
                .catalog_override
                .clone()
                .unwrap_or_else(|| self.config.catalog.path.clone());
            let catalog = Catalog::load(&path).await?;
            builder = builder.with_catalog(catalog);
        }

        builder.build().map_err(CliError::from)
    }

    /// The resolved catalog path for catalog-only commands
    #[must_use]
    pub fn catalog_path(&self) -> PathBuf {
        self.catalog_override
            .clone()
            .unwrap_or_else(|| self.config.catalog.path.clone())
    }
}
