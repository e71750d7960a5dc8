use crate::config::ApiConfig;
use crate::envelope::ApiError;
use monument_core::db::open_db;
use rusqlite::Connection;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Runs `work` on a blocking worker with a fresh connection to the
    /// configured database. The connection is dropped when `work` returns.
    pub async fn with_session<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T, ApiError> + Send + 'static,
    {
        let db_path = self.config.db_path.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = open_db(&db_path)?;
            work(&mut conn)
        })
        .await?
    }
}
