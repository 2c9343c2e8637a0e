//! Issue link types.

use tracing::{debug, instrument};

use super::error::Result;
use super::transport::{segment, ApiBase, Query, Transport};
use super::types::{IssueLinkType, IssueLinkTypes};
use crate::config::ClientConfig;

/// Issue link type API methods.
#[derive(Debug, Clone)]
pub struct LinksApi {
    transport: Transport,
}

impl LinksApi {
    /// Create the links API from a connection configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(config)?,
        })
    }

    /// Get all issue link types ("blocks", "duplicates", "relates to", ...).
    #[instrument(skip(self))]
    pub async fn get_types(&self) -> Result<Vec<IssueLinkType>> {
        let response: IssueLinkTypes = self
            .transport
            .get(ApiBase::Core, "/issueLinkType", &Query::new())
            .await?;
        debug!("Fetched {} link types", response.issue_link_types.len());
        Ok(response.issue_link_types)
    }

    /// Get a link type by id.
    #[instrument(skip(self))]
    pub async fn get_type(&self, link_type_id: &str) -> Result<IssueLinkType> {
        let path = format!("/issueLinkType/{}", segment(link_type_id));
        self.transport.get(ApiBase::Core, &path, &Query::new()).await
    }
}
