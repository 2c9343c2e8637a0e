//! Jira REST API sub-clients and types.
//!
//! Each domain (users, projects, issues, fields, agile, links) has its own
//! sub-client owning a private [`Transport`]. [`crate::JiraClient`] groups them.

mod agile;
mod auth;
pub mod error;
mod fields;
mod issues;
mod links;
pub mod pagination;
mod projects;
mod transport;
pub mod types;
mod users;

pub use agile::{AgileApi, GetBoardsParams, GetSprintIssuesParams, GetSprintsParams};
pub use error::{ApiError, ErrorDetails, Result};
pub use fields::{FieldsApi, DEFAULT_SEARCH_LIMIT};
pub use issues::{
    GetIssueParams, GetTransitionsParams, IssuesApi, SearchParams, DEFAULT_ISSUE_FIELDS,
    DEFAULT_MAX_TOTAL,
};
pub use links::LinksApi;
pub use projects::{GetProjectParams, GetProjectsParams, ProjectsApi};
pub use transport::{ApiBase, Query, Transport};
pub use users::{GetUserParams, SearchUsersParams, UsersApi};
