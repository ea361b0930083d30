//! Operations context for dependency injection
//!
//! The verifier registry is constructed once at service-instantiation
//! time and injected here explicitly, never reached through a
//! module-level singleton; tests build contexts with registries pointed
//! at mock servers and stores in temporary directories.

use pkgprobe_catalog::Catalog;
use pkgprobe_config::Config;
use pkgprobe_errors::{Error, OpsError};
use pkgprobe_events::{EventEmitter, EventSender};
use pkgprobe_net::NetClient;
use pkgprobe_state::VerificationStore;
use pkgprobe_verify::VerifierRegistry;

/// Operations context providing access to all system components
pub struct OpsCtx {
    /// Verifier registry (owns the verifiable/unverifiable partition)
    pub registry: VerifierRegistry,
    /// HTTP client shared by all verifiers
    pub client: NetClient,
    /// Append-only result store
    pub store: VerificationStore,
    /// Application catalog; absent for administrative-only contexts
    pub catalog: Option<Catalog>,
    /// Event sender for progress reporting
    pub tx: EventSender,
    /// System configuration
    pub config: Config,
}

impl OpsCtx {
    // No public constructor - use OpsContextBuilder instead

    /// The loaded catalog
    ///
    /// # Errors
    ///
    /// Returns an error when this context was built without one.
    pub fn catalog(&self) -> Result<&Catalog, Error> {
        self.catalog.as_ref().ok_or_else(|| {
            OpsError::MissingComponent {
                component: "catalog".to_string(),
            }
            .into()
        })
    }
}

impl EventEmitter for OpsCtx {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(&self.tx)
    }
}

/// Builder for operations context
pub struct OpsContextBuilder {
    registry: Option<VerifierRegistry>,
    client: Option<NetClient>,
    store: Option<VerificationStore>,
    catalog: Option<Catalog>,
    tx: Option<EventSender>,
    config: Option<Config>,
}

impl OpsContextBuilder {
    /// Create new context builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: None,
            client: None,
            store: None,
            catalog: None,
            tx: None,
            config: None,
        }
    }

    /// Set verifier registry
    #[must_use]
    pub fn with_registry(mut self, registry: VerifierRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Set network client
    #[must_use]
    pub fn with_client(mut self, client: NetClient) -> Self {
        self.client = Some(client);
        self
    }

    /// Set result store
    #[must_use]
    pub fn with_store(mut self, store: VerificationStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Set application catalog (optional)
    #[must_use]
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Set event sender
    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Set configuration
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the context
    ///
    /// # Errors
    ///
    /// Returns an error if any required component is missing.
    pub fn build(self) -> Result<OpsCtx, Error> {
        let registry = self.registry.ok_or_else(|| OpsError::MissingComponent {
            component: "registry".to_string(),
        })?;

        let client = self.client.ok_or_else(|| OpsError::MissingComponent {
            component: "client".to_string(),
        })?;

        let store = self.store.ok_or_else(|| OpsError::MissingComponent {
            component: "store".to_string(),
        })?;

        let tx = self.tx.ok_or_else(|| OpsError::MissingComponent {
            component: "event_sender".to_string(),
        })?;

        let config = self.config.ok_or_else(|| OpsError::MissingComponent {
            component: "config".to_string(),
        })?;

        Ok(OpsCtx {
            registry,
            client,
            store,
            catalog: self.catalog,
            tx,
            config,
        })
    }
}

impl Default for OpsContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
