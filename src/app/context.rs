use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{DocketError, Result};
use crate::config::Config;
use crate::normalizer::TimeNormalizer;
use crate::remote::graphql::GraphqlClient;
use crate::remote::HearingsApi;
use crate::store::sqlite::SqliteStore;
use crate::sync::{BookmarkSynchronizer, SyncOptions};

pub struct AppContext {
    pub store: Arc<SqliteStore>,
    pub api: Arc<dyn HearingsApi>,
    pub normalizer: TimeNormalizer,
    pub synchronizer: Arc<BookmarkSynchronizer>,
}

impl AppContext {
    pub fn new(db_path: Option<PathBuf>, config: &Config) -> Result<Self> {
        let db_path = match db_path {
            Some(p) => p,
            None => Self::default_db_path()?,
        };

        let store = Arc::new(SqliteStore::new(&db_path)?);
        let api: Arc<dyn HearingsApi> = Arc::new(GraphqlClient::new(&config.remote)?);

        Ok(Self::with_parts(store, api, config))
    }

    /// In-memory database against the given service; used by tests.
    pub fn in_memory(api: Arc<dyn HearingsApi>) -> Result<Self> {
        let store = Arc::new(SqliteStore::in_memory()?);
        Ok(Self::with_parts(store, api, &Config::default()))
    }

    fn with_parts(store: Arc<SqliteStore>, api: Arc<dyn HearingsApi>, config: &Config) -> Self {
        let normalizer = TimeNormalizer::with_format(
            config.display.datetime_format.clone(),
            config.display.placeholder.clone(),
        );
        let synchronizer = Arc::new(BookmarkSynchronizer::new(
            api.clone(),
            store.clone(),
            SyncOptions::from(&config.sync),
        ));

        Self {
            store,
            api,
            normalizer,
            synchronizer,
        }
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| DocketError::Config("Could not find data directory".into()))?;
        let docket_dir = data_dir.join("docket");
        std::fs::create_dir_all(&docket_dir)?;
        Ok(docket_dir.join("docket.db"))
    }
}
