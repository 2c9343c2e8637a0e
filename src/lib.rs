//! jira-dc: a typed client for the Jira Server/Data Center REST API.
//!
//! Authenticates with a personal access token and exposes the core
//! (`/rest/api/2`) and agile (`/rest/agile/1.0`) APIs through the
//! [`JiraClient`] facade.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;

pub use api::{ApiError, Result};
pub use client::{ConnectionStatus, JiraClient};
pub use config::ClientConfig;
