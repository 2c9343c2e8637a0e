//! Field metadata with a one-shot cache.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::SystemTime;

use tracing::{debug, instrument};

use super::error::Result;
use super::transport::{ApiBase, Query, Transport};
use super::types::Field;
use crate::cache::{FieldCache, FieldIndex};
use crate::config::ClientConfig;

/// Default number of matches returned by [`FieldsApi::search`].
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Field-related API methods.
///
/// `GET /rest/api/2/field` is called at most once until a refresh is
/// requested; every lookup is answered from the cached index afterwards.
#[derive(Debug)]
pub struct FieldsApi {
    transport: Transport,
    cache: Mutex<FieldCache>,
}

impl FieldsApi {
    /// Create the fields API from a connection configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(config)?,
            cache: Mutex::new(FieldCache::Empty),
        })
    }

    /// The cached index, fetching it first when empty or when `refresh` is set.
    async fn index(&self, refresh: bool) -> Result<Arc<FieldIndex>> {
        if !refresh {
            if let Some(index) = self.cached() {
                return Ok(index);
            }
        }

        let fields: Vec<Field> = self
            .transport
            .get(ApiBase::Core, "/field", &Query::new())
            .await?;
        debug!(count = fields.len(), refresh, "Fetched field definitions");

        let index = Arc::new(FieldIndex::build(fields));
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(Arc::clone(&index));
        Ok(index)
    }

    fn cached(&self) -> Option<Arc<FieldIndex>> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get()
    }

    /// Get all fields (system and custom).
    ///
    /// Results are cached; pass `refresh = true` to fetch them again.
    #[instrument(skip(self))]
    pub async fn get_all(&self, refresh: bool) -> Result<Vec<Field>> {
        Ok(self.index(refresh).await?.fields().to_vec())
    }

    /// Resolve a field name, id or JQL clause name to the field id.
    ///
    /// Case-insensitive. Returns `Ok(None)` when nothing matches.
    #[instrument(skip(self))]
    pub async fn get_id_by_name(&self, name: &str) -> Result<Option<String>> {
        let index = self.index(false).await?;
        Ok(index.id_by_name(name).map(str::to_string))
    }

    /// Get a field by its exact id. Returns `Ok(None)` when unknown.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Field>> {
        let index = self.index(false).await?;
        Ok(index.by_id(id).cloned())
    }

    /// Get custom fields only.
    #[instrument(skip(self))]
    pub async fn get_custom(&self, refresh: bool) -> Result<Vec<Field>> {
        let index = self.index(refresh).await?;
        Ok(index.custom().cloned().collect())
    }

    /// Find fields whose name or id contains `keyword`, case-insensitively.
    ///
    /// At most `limit` matches are returned, in server order.
    #[instrument(skip(self))]
    pub async fn search(&self, keyword: &str, limit: usize) -> Result<Vec<Field>> {
        let index = self.index(false).await?;
        Ok(index.search(keyword, limit).into_iter().cloned().collect())
    }

    /// When the cached fields were fetched, if they have been.
    pub fn last_refresh(&self) -> Option<SystemTime> {
        self.cached().map(|index| index.last_refresh())
    }
}
