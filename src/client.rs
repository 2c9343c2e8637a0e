//! The `JiraClient` facade.

use tracing::{info, instrument, warn};

use crate::api::types::User;
use crate::api::{AgileApi, FieldsApi, IssuesApi, LinksApi, ProjectsApi, Result, UsersApi};
use crate::config::ClientConfig;

/// Jira Server/Data Center API client.
///
/// Methods are grouped by domain:
/// - `users`: `get_myself`, `get_user`, `search_users`
/// - `projects`: `get_all`, `get`
/// - `issues`: `search`, `search_post`, `get`, `get_transitions`, `search_all`, `count`
/// - `fields`: `get_all`, `get_id_by_name`, `get_by_id`, `get_custom`, `search`
/// - `agile`: `get_boards`, `get_board`, `get_sprints`, `get_sprint_issues`
/// - `links`: `get_types`, `get_type`
///
/// Each group is built independently from its own copy of the
/// configuration; only `fields` keeps state (its cache).
///
/// ```no_run
/// # async fn run() -> jira_dc::api::Result<()> {
/// use jira_dc::{ClientConfig, JiraClient};
/// use jira_dc::api::SearchParams;
///
/// let client = JiraClient::new(ClientConfig::new("https://jira.example.com", "token"))?;
/// let me = client.users.get_myself(None).await?;
/// let page = client.issues.search(&SearchParams::new("project = PROJ")).await?;
/// println!("{} sees {} issues", me, page.total);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct JiraClient {
    /// User-related API methods.
    pub users: UsersApi,
    /// Project-related API methods.
    pub projects: ProjectsApi,
    /// Issue-related API methods.
    pub issues: IssuesApi,
    /// Field-related API methods (cached).
    pub fields: FieldsApi,
    /// Agile API methods (boards, sprints).
    pub agile: AgileApi,
    /// Issue link type methods.
    pub links: LinksApi,
}

/// Outcome of [`JiraClient::test_connection`].
#[derive(Debug, Clone)]
pub enum ConnectionStatus {
    /// The server accepted the credentials.
    Connected(User),
    /// The request failed; `message` describes why.
    Failed {
        /// The error message.
        message: String,
    },
}

impl ConnectionStatus {
    /// Whether the connection check succeeded.
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected(_))
    }

    /// The authenticated user, on success.
    pub fn user(&self) -> Option<&User> {
        match self {
            ConnectionStatus::Connected(user) => Some(user),
            ConnectionStatus::Failed { .. } => None,
        }
    }

    /// The failure message, on failure.
    pub fn error(&self) -> Option<&str> {
        match self {
            ConnectionStatus::Connected(_) => None,
            ConnectionStatus::Failed { message } => Some(message),
        }
    }
}

impl JiraClient {
    /// Create a client.
    ///
    /// No request is sent; use [`JiraClient::test_connection`] to check the
    /// server and credentials.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the base URL or token is missing or
    /// malformed.
    #[instrument(skip(config), fields(base_url = %config.base_url()))]
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Self {
            users: UsersApi::new(&config)?,
            projects: ProjectsApi::new(&config)?,
            issues: IssuesApi::new(&config)?,
            fields: FieldsApi::new(&config)?,
            agile: AgileApi::new(&config)?,
            links: LinksApi::new(&config)?,
        };

        info!("Jira client created");
        Ok(client)
    }

    /// Check connectivity by fetching the current user.
    ///
    /// Never fails: any error is reported as [`ConnectionStatus::Failed`].
    #[instrument(skip(self))]
    pub async fn test_connection(&self) -> ConnectionStatus {
        match self.users.get_myself(None).await {
            Ok(user) => {
                info!("Connected as user: {}", user.display_name);
                ConnectionStatus::Connected(user)
            }
            Err(e) => {
                warn!("Connection check failed: {}", e);
                ConnectionStatus::Failed {
                    message: e.to_string(),
                }
            }
        }
    }
}
