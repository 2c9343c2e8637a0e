//! Jira Server/Data Center request and response types.
//!
//! These types model the REST API v2 and Agile API 1.0 payloads. Optional
//! attributes default when absent since Jira omits fields that were not
//! requested through `fields`/`expand`.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A Jira user.
///
/// Returned by `GET /rest/api/2/myself`, `GET /rest/api/2/user` and embedded
/// in issues. On Data Center `name` is the username and `key` the stable id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// URL of this user resource.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// The user key.
    #[serde(default)]
    pub key: Option<String>,
    /// The username.
    #[serde(default)]
    pub name: String,
    /// The user's email address (may be hidden).
    #[serde(default)]
    pub email_address: Option<String>,
    /// The user's display name.
    #[serde(default)]
    pub display_name: String,
    /// Whether the user is active.
    #[serde(default)]
    pub active: Option<bool>,
    /// Whether the user is deleted.
    #[serde(default)]
    pub deleted: Option<bool>,
    /// The user's timezone.
    #[serde(default)]
    pub time_zone: Option<String>,
    /// The user's locale.
    #[serde(default)]
    pub locale: Option<String>,
    /// Avatar URLs keyed by size (`"48x48"`, ...).
    #[serde(default)]
    pub avatar_urls: HashMap<String, String>,
    /// Group membership (when expanded).
    #[serde(default)]
    pub groups: Option<SizedList<NamedItem>>,
    /// Application roles (when expanded).
    #[serde(default)]
    pub application_roles: Option<SizedList<ApplicationRole>>,
    /// Expand info.
    #[serde(default)]
    pub expand: Option<String>,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}

/// A `{size, items}` container used by expanded user attributes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SizedList<T> {
    /// Total number of entries.
    #[serde(default)]
    pub size: u32,
    /// The entries returned.
    #[serde(default)]
    pub items: Vec<T>,
}

/// A group reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NamedItem {
    /// The group name.
    pub name: String,
    /// URL of the group resource.
    #[serde(rename = "self", default)]
    pub self_url: Option<String>,
}

/// An application role.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApplicationRole {
    /// The role key.
    pub key: String,
    /// The role name.
    pub name: String,
}

/// A Jira project.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// URL of this project resource.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// The project ID.
    #[serde(default)]
    pub id: String,
    /// The project key (e.g., "PROJ").
    #[serde(default)]
    pub key: String,
    /// The project name.
    #[serde(default)]
    pub name: String,
    /// The project description.
    #[serde(default)]
    pub description: Option<String>,
    /// The project lead.
    #[serde(default)]
    pub lead: Option<User>,
    /// The project category.
    #[serde(default)]
    pub project_category: Option<ProjectCategory>,
    /// Avatar URLs keyed by size.
    #[serde(default)]
    pub avatar_urls: HashMap<String, String>,
    /// The project type key (software, business, ...).
    #[serde(default)]
    pub project_type_key: Option<String>,
    /// Whether the project is archived.
    #[serde(default)]
    pub archived: Option<bool>,
    /// Expand info.
    #[serde(default)]
    pub expand: Option<String>,
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.key)
    }
}

/// A project category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProjectCategory {
    /// The category ID.
    pub id: String,
    /// The category name.
    pub name: String,
    /// The category description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Paginated search result from a JQL query.
///
/// Returned by `/rest/api/2/search` and `/rest/agile/1.0/sprint/{id}/issue`.
/// The page is exhausted once `total` items have been read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults<T = Issue> {
    /// The index of the first result.
    #[serde(default)]
    pub start_at: u32,
    /// Maximum results the server used for this page.
    #[serde(default)]
    pub max_results: u32,
    /// Total number of matching items.
    #[serde(default)]
    pub total: u64,
    /// The items of this page.
    #[serde(default = "Vec::new")]
    pub issues: Vec<T>,
    /// Expand info.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expand: Option<String>,
    /// Warnings about the JQL query.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warning_messages: Vec<String>,
}

/// Paginated agile response (`{values, isLast}`).
///
/// Returned by board and sprint listings. The page is exhausted once the
/// server sets `isLast`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValuesPage<T> {
    /// Maximum results the server used for this page.
    #[serde(default)]
    pub max_results: u32,
    /// The index of the first result.
    #[serde(default)]
    pub start_at: u32,
    /// Total number of items, when the server reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    /// Whether this is the final page.
    #[serde(default)]
    pub is_last: bool,
    /// The items of this page.
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
}

/// A Jira issue.
///
/// Returned by `GET /rest/api/2/issue/{issueKey}` or as part of search results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// The issue ID.
    pub id: String,
    /// The issue key (e.g., "PROJ-123").
    pub key: String,
    /// URL of this issue resource.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// Expand info.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expand: Option<String>,
    /// The issue fields.
    #[serde(default)]
    pub fields: IssueFields,
    /// Change history (when expanded).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changelog: Option<Changelog>,
    /// HTML-rendered field values (when expanded).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rendered_fields: Option<HashMap<String, serde_json::Value>>,
    /// Field id to display name (when expanded).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub names: Option<HashMap<String, String>>,
}

impl Issue {
    /// Get the issue summary.
    pub fn summary(&self) -> &str {
        &self.fields.summary
    }

    /// Get the issue status name, if returned.
    pub fn status(&self) -> Option<&str> {
        self.fields.status.as_ref().map(|s| s.name.as_str())
    }

    /// Get the issue type name, if returned.
    pub fn issue_type(&self) -> Option<&str> {
        self.fields.issuetype.as_ref().map(|t| t.name.as_str())
    }

    /// Get the assignee display name, or "Unassigned" if not set.
    pub fn assignee_name(&self) -> &str {
        self.fields
            .assignee
            .as_ref()
            .map(|u| u.display_name.as_str())
            .unwrap_or("Unassigned")
    }

    /// Get the priority name, or "None" if not set.
    pub fn priority_name(&self) -> &str {
        self.fields
            .priority
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("None")
    }

    /// Get the project key, if available.
    pub fn project_key(&self) -> Option<&str> {
        self.fields.project.as_ref().map(|p| p.key.as_str())
    }

    /// Get the raw value of a custom or otherwise unmodelled field.
    pub fn custom_field(&self, field_id: &str) -> Option<&serde_json::Value> {
        self.fields.extra.get(field_id).filter(|v| !v.is_null())
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.fields.summary)
    }
}

/// Issue fields.
///
/// Every attribute is optional because the `fields` request parameter
/// controls which ones Jira returns. Anything not modelled here, including
/// `customfield_*` values, lands in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IssueFields {
    /// The issue summary/title.
    #[serde(default)]
    pub summary: String,
    /// The issue description (wiki markup on Data Center).
    #[serde(default)]
    pub description: Option<serde_json::Value>,
    /// The issue type.
    #[serde(default)]
    pub issuetype: Option<IssueType>,
    /// The project this issue belongs to.
    #[serde(default)]
    pub project: Option<Project>,
    /// The issue status.
    #[serde(default)]
    pub status: Option<Status>,
    /// The issue priority.
    #[serde(default)]
    pub priority: Option<Priority>,
    /// The resolution.
    #[serde(default)]
    pub resolution: Option<Resolution>,
    /// The issue assignee.
    #[serde(default)]
    pub assignee: Option<User>,
    /// The issue reporter.
    #[serde(default)]
    pub reporter: Option<User>,
    /// The issue creator.
    #[serde(default)]
    pub creator: Option<User>,
    /// When the issue was created.
    #[serde(default)]
    pub created: Option<String>,
    /// When the issue was last updated.
    #[serde(default)]
    pub updated: Option<String>,
    /// When the issue is due.
    #[serde(default)]
    pub duedate: Option<String>,
    /// When the issue was resolved.
    #[serde(default)]
    pub resolutiondate: Option<String>,
    /// Labels attached to the issue.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Components the issue is associated with.
    #[serde(default)]
    pub components: Vec<Component>,
    /// Fix versions.
    #[serde(default)]
    pub fix_versions: Vec<Version>,
    /// Affected versions.
    #[serde(default)]
    pub versions: Vec<Version>,
    /// Links to other issues.
    #[serde(default)]
    pub issuelinks: Vec<IssueLink>,
    /// Sub-tasks.
    #[serde(default)]
    pub subtasks: Vec<IssueBasic>,
    /// Parent issue (for sub-tasks).
    #[serde(default)]
    pub parent: Option<IssueBasic>,
    /// Comments.
    #[serde(default)]
    pub comment: Option<CommentPage>,
    /// Work log.
    #[serde(default)]
    pub worklog: Option<WorklogPage>,
    /// Attachments.
    #[serde(default)]
    pub attachment: Vec<Attachment>,
    /// Time tracking.
    #[serde(default)]
    pub timetracking: Option<TimeTracking>,
    /// Watchers summary.
    #[serde(default)]
    pub watches: Option<Watches>,
    /// Votes summary.
    #[serde(default)]
    pub votes: Option<Votes>,
    /// Custom fields and anything else not modelled above.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Issue status.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    /// URL of this status resource.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// The status ID.
    pub id: String,
    /// The status name (e.g., "Open", "In Progress", "Closed").
    pub name: String,
    /// The status description.
    #[serde(default)]
    pub description: Option<String>,
    /// URL to the status icon.
    #[serde(default)]
    pub icon_url: Option<String>,
    /// The status category.
    #[serde(default)]
    pub status_category: Option<StatusCategory>,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Status category (groups statuses into to-do, in-progress, done).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusCategory {
    /// The category ID.
    pub id: u32,
    /// The category key.
    pub key: String,
    /// The category name.
    pub name: String,
    /// The category color.
    #[serde(default)]
    pub color_name: Option<String>,
}

/// Issue type (Bug, Story, Task, Epic, etc.).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IssueType {
    /// URL of this issue type resource.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// The issue type ID.
    pub id: String,
    /// The issue type name.
    pub name: String,
    /// The issue type description.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether this is a subtask type.
    #[serde(default)]
    pub subtask: bool,
    /// URL to the issue type icon.
    #[serde(default)]
    pub icon_url: Option<String>,
    /// Avatar ID.
    #[serde(default)]
    pub avatar_id: Option<u64>,
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Issue priority.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Priority {
    /// URL of this priority resource.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// The priority ID.
    pub id: String,
    /// The priority name (e.g., "High", "Medium", "Low").
    pub name: String,
    /// URL to the priority icon.
    #[serde(default)]
    pub icon_url: Option<String>,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Issue resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Resolution {
    /// URL of this resolution resource.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// The resolution ID.
    pub id: String,
    /// The resolution name.
    pub name: String,
    /// The resolution description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A project component.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Component {
    /// URL of this component resource.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// The component ID.
    pub id: String,
    /// The component name.
    pub name: String,
    /// The component description.
    #[serde(default)]
    pub description: Option<String>,
    /// The component lead.
    #[serde(default)]
    pub lead: Option<User>,
}

/// A project version (fix version or affected version).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    /// URL of this version resource.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// The version ID.
    pub id: String,
    /// The version name.
    pub name: String,
    /// Whether the version is archived.
    #[serde(default)]
    pub archived: Option<bool>,
    /// Whether the version is released.
    #[serde(default)]
    pub released: Option<bool>,
    /// Release date.
    #[serde(default)]
    pub release_date: Option<String>,
    /// Start date.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A comment on an issue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// URL of this comment resource.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// The comment ID.
    pub id: String,
    /// The comment author.
    #[serde(default)]
    pub author: Option<User>,
    /// The comment body (wiki markup string on Data Center).
    #[serde(default)]
    pub body: serde_json::Value,
    /// The user who last edited the comment.
    #[serde(default)]
    pub update_author: Option<User>,
    /// When the comment was created.
    #[serde(default)]
    pub created: String,
    /// When the comment was last updated.
    #[serde(default)]
    pub updated: Option<String>,
}

/// Comments embedded in an issue's fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentPage {
    /// The comments.
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Maximum results.
    #[serde(default)]
    pub max_results: u32,
    /// Total number of comments.
    #[serde(default)]
    pub total: u32,
    /// The index of the first comment.
    #[serde(default)]
    pub start_at: u32,
}

/// A work log entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Worklog {
    /// URL of this worklog resource.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// The worklog ID.
    pub id: String,
    /// The author.
    #[serde(default)]
    pub author: Option<User>,
    /// The user who last edited the entry.
    #[serde(default)]
    pub update_author: Option<User>,
    /// Work description.
    #[serde(default)]
    pub comment: Option<String>,
    /// When the entry was created.
    #[serde(default)]
    pub created: String,
    /// When the entry was last updated.
    #[serde(default)]
    pub updated: Option<String>,
    /// When the work started.
    #[serde(default)]
    pub started: String,
    /// Time spent (e.g., "3h 20m").
    #[serde(default)]
    pub time_spent: String,
    /// Time spent in seconds.
    #[serde(default)]
    pub time_spent_seconds: u64,
}

/// Work log embedded in an issue's fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorklogPage {
    /// The entries.
    #[serde(default)]
    pub worklogs: Vec<Worklog>,
    /// Maximum results.
    #[serde(default)]
    pub max_results: u32,
    /// Total number of entries.
    #[serde(default)]
    pub total: u32,
    /// The index of the first entry.
    #[serde(default)]
    pub start_at: u32,
}

/// An issue attachment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// URL of this attachment resource.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// The attachment ID.
    pub id: String,
    /// The file name.
    pub filename: String,
    /// The uploader.
    #[serde(default)]
    pub author: Option<User>,
    /// When the file was attached.
    #[serde(default)]
    pub created: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// MIME type.
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Download URL.
    #[serde(default)]
    pub content: Option<String>,
    /// Thumbnail URL.
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Time tracking summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeTracking {
    /// Original estimate (e.g., "1d").
    #[serde(default)]
    pub original_estimate: Option<String>,
    /// Remaining estimate.
    #[serde(default)]
    pub remaining_estimate: Option<String>,
    /// Time spent.
    #[serde(default)]
    pub time_spent: Option<String>,
    /// Original estimate in seconds.
    #[serde(default)]
    pub original_estimate_seconds: Option<u64>,
    /// Remaining estimate in seconds.
    #[serde(default)]
    pub remaining_estimate_seconds: Option<u64>,
    /// Time spent in seconds.
    #[serde(default)]
    pub time_spent_seconds: Option<u64>,
}

/// Watchers summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Watches {
    /// URL of the watchers resource.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// Number of watchers.
    #[serde(default)]
    pub watch_count: u32,
    /// Whether the current user is watching.
    #[serde(default)]
    pub is_watching: bool,
}

/// Votes summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Votes {
    /// URL of the votes resource.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// Number of votes.
    #[serde(default)]
    pub votes: u32,
    /// Whether the current user voted.
    #[serde(default)]
    pub has_voted: bool,
}

/// Issue change history.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Changelog {
    /// The index of the first history entry.
    #[serde(default)]
    pub start_at: u32,
    /// Maximum results.
    #[serde(default)]
    pub max_results: u32,
    /// Total number of history entries.
    #[serde(default)]
    pub total: u32,
    /// The history entries.
    #[serde(default)]
    pub histories: Vec<ChangelogHistory>,
}

/// One change set in an issue's history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangelogHistory {
    /// The history ID.
    pub id: String,
    /// Who made the change.
    #[serde(default)]
    pub author: Option<User>,
    /// When the change was made.
    #[serde(default)]
    pub created: String,
    /// The changed fields.
    #[serde(default)]
    pub items: Vec<ChangelogItem>,
}

/// A single field change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChangelogItem {
    /// The field name.
    pub field: String,
    /// The field type (jira, custom).
    #[serde(default)]
    pub fieldtype: String,
    /// The field id (for custom fields).
    #[serde(default)]
    pub field_id: Option<String>,
    /// Previous raw value.
    #[serde(default)]
    pub from: Option<String>,
    /// Previous display value.
    #[serde(default)]
    pub from_string: Option<String>,
    /// New raw value.
    #[serde(default)]
    pub to: Option<String>,
    /// New display value.
    #[serde(default, rename = "toString")]
    pub to_string_value: Option<String>,
}

/// Minimal issue reference used in links, parents and sub-tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IssueBasic {
    /// The issue ID.
    pub id: String,
    /// The issue key.
    pub key: String,
    /// URL of the issue resource.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// A subset of the issue fields.
    #[serde(default)]
    pub fields: Option<IssueBasicFields>,
}

/// Fields carried by an [`IssueBasic`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IssueBasicFields {
    /// Summary.
    #[serde(default)]
    pub summary: Option<String>,
    /// Status.
    #[serde(default)]
    pub status: Option<Status>,
    /// Priority.
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Issue type.
    #[serde(default)]
    pub issuetype: Option<IssueType>,
}

/// A type of relationship between two issues.
///
/// Returned by `GET /rest/api/2/issueLinkType`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IssueLinkType {
    /// The link type ID.
    pub id: String,
    /// The link type name (e.g., "Blocks").
    pub name: String,
    /// Inward description (e.g., "is blocked by").
    #[serde(default)]
    pub inward: String,
    /// Outward description (e.g., "blocks").
    #[serde(default)]
    pub outward: String,
    /// URL of this link type resource.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
}

impl fmt::Display for IssueLinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: \"{}\" / \"{}\"", self.name, self.inward, self.outward)
    }
}

/// Wrapper returned by `GET /rest/api/2/issueLinkType`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IssueLinkTypes {
    /// All link types.
    #[serde(default)]
    pub issue_link_types: Vec<IssueLinkType>,
}

/// A link between two issues.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IssueLink {
    /// The link ID.
    pub id: String,
    /// URL of this link resource.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// The link type.
    #[serde(rename = "type")]
    pub link_type: IssueLinkType,
    /// The inward issue, when this issue is the outward side.
    #[serde(default)]
    pub inward_issue: Option<IssueBasic>,
    /// The outward issue, when this issue is the inward side.
    #[serde(default)]
    pub outward_issue: Option<IssueBasic>,
}

/// A workflow transition available for an issue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    /// The transition ID.
    pub id: String,
    /// The transition name.
    pub name: String,
    /// The status the issue moves to.
    pub to: Status,
    /// Whether a screen is shown.
    #[serde(default)]
    pub has_screen: Option<bool>,
    /// Whether this is a global transition.
    #[serde(default)]
    pub is_global: Option<bool>,
    /// Whether this is the initial transition.
    #[serde(default)]
    pub is_initial: Option<bool>,
    /// Whether the transition is conditional.
    #[serde(default)]
    pub is_conditional: Option<bool>,
    /// Screen fields (when expanded).
    #[serde(default)]
    pub fields: Option<HashMap<String, serde_json::Value>>,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.name, self.to.name)
    }
}

/// Response of `GET /rest/api/2/issue/{key}/transitions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TransitionsResponse {
    /// Expand info.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expand: Option<String>,
    /// The available transitions.
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

/// A field definition.
///
/// Returned by `GET /rest/api/2/field`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Field ID (e.g., "summary", "customfield_10001").
    pub id: String,
    /// Field key (may differ from id).
    #[serde(default)]
    pub key: Option<String>,
    /// Display name.
    pub name: String,
    /// Whether this is a custom field.
    #[serde(default)]
    pub custom: bool,
    /// Whether the field can be used in ORDER BY.
    #[serde(default)]
    pub orderable: Option<bool>,
    /// Whether the field can be shown in issue navigator columns.
    #[serde(default)]
    pub navigable: Option<bool>,
    /// Whether the field can be searched with JQL.
    #[serde(default)]
    pub searchable: Option<bool>,
    /// Names by which JQL refers to this field.
    #[serde(default)]
    pub clause_names: Vec<String>,
    /// Value schema.
    #[serde(default)]
    pub schema: Option<FieldSchema>,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Schema describing a field's value type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    /// The value type (string, array, user, ...).
    #[serde(rename = "type")]
    pub value_type: String,
    /// Element type for arrays.
    #[serde(default)]
    pub items: Option<String>,
    /// System field identifier.
    #[serde(default)]
    pub system: Option<String>,
    /// Custom field type key.
    #[serde(default)]
    pub custom: Option<String>,
    /// Custom field numeric id.
    #[serde(default)]
    pub custom_id: Option<u64>,
}

/// Agile board type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardType {
    /// Scrum board.
    Scrum,
    /// Kanban board.
    Kanban,
    /// Simple board.
    Simple,
}

impl BoardType {
    /// The value used in query parameters.
    pub fn as_str(self) -> &'static str {
        match self {
            BoardType::Scrum => "scrum",
            BoardType::Kanban => "kanban",
            BoardType::Simple => "simple",
        }
    }
}

impl fmt::Display for BoardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BoardType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "scrum" => Ok(BoardType::Scrum),
            "kanban" => Ok(BoardType::Kanban),
            "simple" => Ok(BoardType::Simple),
            other => Err(format!("unknown board type '{}'", other)),
        }
    }
}

/// An agile board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Board {
    /// Board ID.
    pub id: u64,
    /// URL of this board resource.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// Board name.
    pub name: String,
    /// Board type.
    #[serde(rename = "type")]
    pub board_type: BoardType,
    /// The project the board is located in.
    #[serde(default)]
    pub location: Option<BoardLocation>,
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.id, self.board_type)
    }
}

/// Where a board lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoardLocation {
    /// Project ID.
    #[serde(default)]
    pub project_id: Option<u64>,
    /// Display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Project name.
    #[serde(default)]
    pub project_name: Option<String>,
    /// Project key.
    #[serde(default)]
    pub project_key: Option<String>,
    /// Project type key.
    #[serde(default)]
    pub project_type_key: Option<String>,
    /// Avatar URI.
    #[serde(default, rename = "avatarURI")]
    pub avatar_uri: Option<String>,
    /// Location name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Sprint lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SprintState {
    /// Not started yet.
    Future,
    /// In progress.
    Active,
    /// Completed.
    Closed,
}

impl SprintState {
    /// The value used in query parameters.
    pub fn as_str(self) -> &'static str {
        match self {
            SprintState::Future => "future",
            SprintState::Active => "active",
            SprintState::Closed => "closed",
        }
    }
}

impl fmt::Display for SprintState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SprintState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "future" => Ok(SprintState::Future),
            "active" => Ok(SprintState::Active),
            "closed" => Ok(SprintState::Closed),
            other => Err(format!("unknown sprint state '{}'", other)),
        }
    }
}

/// An agile sprint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    /// Sprint ID.
    pub id: u64,
    /// URL of this sprint resource.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// Sprint state.
    pub state: SprintState,
    /// Sprint name.
    pub name: String,
    /// Start date (ISO format).
    #[serde(default)]
    pub start_date: Option<String>,
    /// End date (ISO format).
    #[serde(default)]
    pub end_date: Option<String>,
    /// Completion date (ISO format).
    #[serde(default)]
    pub complete_date: Option<String>,
    /// Activation date (ISO format).
    #[serde(default)]
    pub activated_date: Option<String>,
    /// Board the sprint was created on.
    #[serde(default)]
    pub origin_board_id: Option<u64>,
    /// Sprint goal.
    #[serde(default)]
    pub goal: Option<String>,
    /// Whether the sprint is synced.
    #[serde(default)]
    pub synced: Option<bool>,
}

impl fmt::Display for Sprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.state)
    }
}
