//! User lookups.

use tracing::{debug, instrument};

use super::error::Result;
use super::transport::{ApiBase, Query, Transport};
use super::types::User;
use crate::config::ClientConfig;

/// Parameters for [`UsersApi::get_user`].
#[derive(Debug, Clone, Default)]
pub struct GetUserParams {
    /// Username to look up.
    pub username: Option<String>,
    /// User key to look up (alternative to the username).
    pub key: Option<String>,
    /// Attributes to expand (e.g. `groups,applicationRoles`).
    pub expand: Option<String>,
}

impl GetUserParams {
    /// Look up a user by username.
    pub fn by_username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Self::default()
        }
    }

    /// Look up a user by key.
    pub fn by_key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::default()
        }
    }
}

/// Parameters for [`UsersApi::search_users`].
#[derive(Debug, Clone)]
pub struct SearchUsersParams {
    /// Username, name or email pattern to match.
    pub username: String,
    /// Index of the first user to return.
    pub start_at: u32,
    /// Maximum number of users to return.
    pub max_results: u32,
    /// Include active users.
    pub include_active: bool,
    /// Include inactive users.
    pub include_inactive: bool,
}

impl SearchUsersParams {
    /// Search active users matching `username` with default paging.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            start_at: 0,
            max_results: 50,
            include_active: true,
            include_inactive: false,
        }
    }
}

/// User-related API methods.
#[derive(Debug, Clone)]
pub struct UsersApi {
    transport: Transport,
}

impl UsersApi {
    /// Create the users API from a connection configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(config)?,
        })
    }

    /// Get the currently authenticated user.
    ///
    /// Calls `GET /rest/api/2/myself`.
    #[instrument(skip(self))]
    pub async fn get_myself(&self, expand: Option<&str>) -> Result<User> {
        let query = Query::new().with_opt("expand", expand);
        let user: User = self.transport.get(ApiBase::Core, "/myself", &query).await?;
        debug!(user = %user.name, "Fetched current user");
        Ok(user)
    }

    /// Get a user by username or key.
    ///
    /// Calls `GET /rest/api/2/user`.
    #[instrument(skip(self))]
    pub async fn get_user(&self, params: &GetUserParams) -> Result<User> {
        let query = Query::new()
            .with_opt("username", params.username.as_deref())
            .with_opt("key", params.key.as_deref())
            .with_opt("expand", params.expand.as_deref());
        self.transport.get(ApiBase::Core, "/user", &query).await
    }

    /// Search for users by username pattern.
    ///
    /// Calls `GET /rest/api/2/user/search`. Returns a single page.
    #[instrument(skip(self), fields(username = %params.username))]
    pub async fn search_users(&self, params: &SearchUsersParams) -> Result<Vec<User>> {
        let query = Query::new()
            .with("username", &params.username)
            .with("startAt", params.start_at)
            .with("maxResults", params.max_results)
            .with("includeActive", params.include_active)
            .with("includeInactive", params.include_inactive);
        let users: Vec<User> = self
            .transport
            .get(ApiBase::Core, "/user/search", &query)
            .await?;
        debug!("Found {} users", users.len());
        Ok(users)
    }
}
