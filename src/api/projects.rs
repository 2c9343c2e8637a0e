//! Project lookups.

use tracing::{debug, instrument};

use super::error::Result;
use super::transport::{segment, ApiBase, Query, Transport};
use super::types::Project;
use crate::config::ClientConfig;

/// Parameters for [`ProjectsApi::get_all`].
#[derive(Debug, Clone, Default)]
pub struct GetProjectsParams {
    /// Attributes to expand (e.g. `description,lead`).
    pub expand: Option<String>,
    /// Include archived projects.
    pub include_archived: bool,
}

/// Parameters for [`ProjectsApi::get`].
#[derive(Debug, Clone)]
pub struct GetProjectParams {
    /// Project key or numeric id.
    pub project_key_or_id: String,
    /// Attributes to expand.
    pub expand: Option<String>,
}

impl GetProjectParams {
    /// Look up a project by key or id.
    pub fn new(project_key_or_id: impl Into<String>) -> Self {
        Self {
            project_key_or_id: project_key_or_id.into(),
            expand: None,
        }
    }
}

/// Project-related API methods.
#[derive(Debug, Clone)]
pub struct ProjectsApi {
    transport: Transport,
}

impl ProjectsApi {
    /// Create the projects API from a connection configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(config)?,
        })
    }

    /// Get all projects visible to the authenticated user.
    ///
    /// Calls `GET /rest/api/2/project`.
    #[instrument(skip(self))]
    pub async fn get_all(&self, params: &GetProjectsParams) -> Result<Vec<Project>> {
        let query = Query::new()
            .with_opt("expand", params.expand.as_deref())
            .with_opt("includeArchived", params.include_archived.then_some(true));
        let projects: Vec<Project> = self.transport.get(ApiBase::Core, "/project", &query).await?;
        debug!("Fetched {} projects", projects.len());
        Ok(projects)
    }

    /// Get a project by key or id.
    ///
    /// Calls `GET /rest/api/2/project/{projectKeyOrId}`.
    #[instrument(skip(self), fields(project = %params.project_key_or_id))]
    pub async fn get(&self, params: &GetProjectParams) -> Result<Project> {
        let path = format!("/project/{}", segment(&params.project_key_or_id));
        let query = Query::new().with_opt("expand", params.expand.as_deref());
        self.transport.get(ApiBase::Core, &path, &query).await
    }
}
