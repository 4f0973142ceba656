//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by every command.
//! Services are generic over the storage/probe/transport traits, but
//! AppState pins them to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use charla_core::chat::client::StreamingChatClient;
use charla_core::consent::ConsentGate;
use charla_core::monitor::AvailabilityMonitor;
use charla_core::session::identity::IdentityService;
use charla_core::session::index::ConversationIndex;
use charla_core::session::prefs::Preferences;
use charla_infra::config::{load_client_config, resolve_data_dir};
use charla_infra::http::{HttpChatTransport, HttpServiceProbe};
use charla_infra::sqlite::{DatabasePool, SqliteKvStore};
use charla_types::config::ClientConfig;

/// Concrete type aliases for the service generics pinned to infra.
pub type ConcreteIdentity = IdentityService<SqliteKvStore>;
pub type ConcreteIndex = ConversationIndex<SqliteKvStore>;
pub type ConcretePreferences = Preferences<SqliteKvStore>;
pub type ConcreteConsentGate = ConsentGate<SqliteKvStore, HttpServiceProbe>;
pub type ConcreteMonitor = AvailabilityMonitor<HttpServiceProbe>;
pub type ConcreteChatClient = StreamingChatClient<HttpChatTransport>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<ConcreteIdentity>,
    pub index: Arc<ConcreteIndex>,
    pub prefs: Arc<ConcretePreferences>,
    pub consent: Arc<ConcreteConsentGate>,
    pub monitor: Arc<ConcreteMonitor>,
    pub chat: Arc<ConcreteChatClient>,
    pub config: ClientConfig,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: load config, connect to the
    /// database, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_client_config(&data_dir).await;

        let db_url = format!("sqlite://{}?mode=rwc", data_dir.join("charla.db").display());
        let db_pool = DatabasePool::new(&db_url).await?;
        let kv = SqliteKvStore::new(db_pool.clone());

        let health_timeout = Duration::from_secs(config.health_timeout_secs);
        let catalog_timeout = Duration::from_secs(config.catalog_timeout_secs);
        let probe = || {
            HttpServiceProbe::new(config.base_url.clone(), health_timeout, catalog_timeout)
        };

        let monitor =
            AvailabilityMonitor::new(probe()).with_timeouts(health_timeout, catalog_timeout);
        let chat = StreamingChatClient::new(HttpChatTransport::new(config.base_url.clone()));
        let consent = ConsentGate::new(kv.clone(), probe());

        Ok(Self {
            identity: Arc::new(IdentityService::new(kv.clone())),
            index: Arc::new(ConversationIndex::new(kv.clone())),
            prefs: Arc::new(Preferences::new(kv)),
            consent: Arc::new(consent),
            monitor: Arc::new(monitor),
            chat: Arc::new(chat),
            config,
            data_dir,
            db_pool,
        })
    }
}
