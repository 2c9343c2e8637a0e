//! Issue search and retrieval.

use serde::Serialize;
use tracing::{debug, info, instrument};

use super::error::Result;
use super::pagination::{clamp_page_size, collect_until_total, TotalLimits, MAX_PAGE_SIZE};
use super::transport::{segment, ApiBase, Query, Transport};
use super::types::{Issue, SearchResults, TransitionsResponse};
use crate::config::ClientConfig;

/// Fields requested by searches that do not name their own.
pub const DEFAULT_ISSUE_FIELDS: &[&str] = &[
    "summary",
    "status",
    "issuetype",
    "priority",
    "assignee",
    "reporter",
    "creator",
    "created",
    "updated",
    "duedate",
    "resolutiondate",
    "resolution",
    "labels",
    "components",
    "fixVersions",
    "project",
    "parent",
    "description",
];

/// Default cap on the number of issues [`IssuesApi::search_all`] collects.
pub const DEFAULT_MAX_TOTAL: usize = 1000;

/// Parameters for a JQL search.
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// The JQL query.
    pub jql: String,
    /// Index of the first issue (single-page searches only).
    pub start_at: Option<u32>,
    /// Page size; defaults to and is capped at 50.
    pub max_results: Option<u32>,
    /// Fields to return; [`DEFAULT_ISSUE_FIELDS`] when unset.
    pub fields: Option<Vec<String>>,
    /// Comma-separated entities to expand (e.g. `changelog,names`).
    pub expand: Option<String>,
    /// Whether Jira should validate the JQL.
    pub validate_query: bool,
}

impl SearchParams {
    /// Search with `jql` and default paging.
    pub fn new(jql: impl Into<String>) -> Self {
        Self {
            jql: jql.into(),
            start_at: None,
            max_results: None,
            fields: None,
            expand: None,
            validate_query: true,
        }
    }

    /// Set the index of the first issue.
    pub fn start_at(mut self, start_at: u32) -> Self {
        self.start_at = Some(start_at);
        self
    }

    /// Set the page size.
    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Set the fields to return.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Set the entities to expand.
    pub fn expand(mut self, expand: impl Into<String>) -> Self {
        self.expand = Some(expand.into());
        self
    }

    /// Enable or disable JQL validation.
    pub fn validate_query(mut self, validate: bool) -> Self {
        self.validate_query = validate;
        self
    }

    fn field_list(&self) -> Vec<String> {
        match &self.fields {
            Some(fields) => fields.clone(),
            None => DEFAULT_ISSUE_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }

    fn page_size(&self) -> u32 {
        clamp_page_size(self.max_results.unwrap_or(MAX_PAGE_SIZE))
    }

    /// Query string form used by `GET /search`.
    fn to_query(&self) -> Query {
        Query::new()
            .with("jql", &self.jql)
            .with("startAt", self.start_at.unwrap_or(0))
            .with("maxResults", self.page_size())
            .with("fields", self.field_list().join(","))
            .with_opt("expand", self.expand.as_deref())
            .with("validateQuery", self.validate_query)
    }

    /// JSON body form used by `POST /search`.
    fn to_body(&self) -> SearchBody<'_> {
        SearchBody {
            jql: &self.jql,
            start_at: self.start_at.unwrap_or(0),
            max_results: self.page_size(),
            fields: self.field_list(),
            expand: self.expand.as_deref().map(|e| {
                e.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            }),
            validate_query: self.validate_query,
        }
    }
}

/// Request body of `POST /rest/api/2/search`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchBody<'a> {
    jql: &'a str,
    start_at: u32,
    max_results: u32,
    fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expand: Option<Vec<String>>,
    validate_query: bool,
}

/// Parameters for [`IssuesApi::get`].
#[derive(Debug, Clone)]
pub struct GetIssueParams {
    /// Issue key or id (e.g. `PROJ-123`).
    pub issue_key_or_id: String,
    /// Fields to return (`*all` for everything); server default when unset.
    pub fields: Option<Vec<String>>,
    /// Entities to expand (e.g. `changelog,renderedFields`).
    pub expand: Option<String>,
    /// Issue properties to return.
    pub properties: Option<String>,
    /// Record the view in the user's issue history.
    pub update_history: bool,
}

impl GetIssueParams {
    /// Fetch `issue_key_or_id` with server-default fields.
    pub fn new(issue_key_or_id: impl Into<String>) -> Self {
        Self {
            issue_key_or_id: issue_key_or_id.into(),
            fields: None,
            expand: None,
            properties: None,
            update_history: true,
        }
    }
}

/// Parameters for [`IssuesApi::get_transitions`].
#[derive(Debug, Clone)]
pub struct GetTransitionsParams {
    /// Issue key or id.
    pub issue_key_or_id: String,
    /// Restrict the result to one transition.
    pub transition_id: Option<String>,
    /// Entities to expand (e.g. `transitions.fields`).
    pub expand: Option<String>,
}

impl GetTransitionsParams {
    /// All transitions of `issue_key_or_id`.
    pub fn new(issue_key_or_id: impl Into<String>) -> Self {
        Self {
            issue_key_or_id: issue_key_or_id.into(),
            transition_id: None,
            expand: None,
        }
    }
}

/// Issue-related API methods.
#[derive(Debug, Clone)]
pub struct IssuesApi {
    transport: Transport,
}

impl IssuesApi {
    /// Create the issues API from a connection configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(config)?,
        })
    }

    /// Search for issues using JQL.
    ///
    /// Returns one page. Use `start_at`/`max_results` to page manually or
    /// [`IssuesApi::search_all`] to collect every page. At most 50 issues
    /// are returned per request.
    #[instrument(skip(self, params), fields(jql = %params.jql))]
    pub async fn search(&self, params: &SearchParams) -> Result<SearchResults<Issue>> {
        let query = params.to_query();
        debug!(
            "Searching issues: startAt={}, maxResults={}",
            params.start_at.unwrap_or(0),
            params.page_size()
        );

        let result: SearchResults<Issue> =
            self.transport.get(ApiBase::Core, "/search", &query).await?;
        debug!("Found {} issues (total: {})", result.issues.len(), result.total);
        Ok(result)
    }

    /// Search for issues using POST.
    ///
    /// Same as [`IssuesApi::search`] but sends the query in the request body,
    /// which avoids URL length limits for long JQL.
    #[instrument(skip(self, params), fields(jql = %params.jql))]
    pub async fn search_post(&self, params: &SearchParams) -> Result<SearchResults<Issue>> {
        let body = params.to_body();
        let result: SearchResults<Issue> =
            self.transport.post(ApiBase::Core, "/search", &body).await?;
        debug!("Found {} issues (total: {})", result.issues.len(), result.total);
        Ok(result)
    }

    /// Get a single issue by key or id.
    ///
    /// Calls `GET /rest/api/2/issue/{issueKeyOrId}`.
    #[instrument(skip(self, params), fields(issue_key = %params.issue_key_or_id))]
    pub async fn get(&self, params: &GetIssueParams) -> Result<Issue> {
        let path = format!("/issue/{}", segment(&params.issue_key_or_id));
        let query = Query::new()
            .with_opt("fields", params.fields.as_ref().map(|f| f.join(",")))
            .with_opt("expand", params.expand.as_deref())
            .with_opt("properties", params.properties.as_deref())
            .with("updateHistory", params.update_history);

        let issue: Issue = self.transport.get(ApiBase::Core, &path, &query).await?;
        debug!("Fetched issue: {}", issue.key);
        Ok(issue)
    }

    /// Get the workflow transitions available for an issue.
    ///
    /// Calls `GET /rest/api/2/issue/{issueKeyOrId}/transitions`.
    #[instrument(skip(self, params), fields(issue_key = %params.issue_key_or_id))]
    pub async fn get_transitions(
        &self,
        params: &GetTransitionsParams,
    ) -> Result<TransitionsResponse> {
        let path = format!("/issue/{}/transitions", segment(&params.issue_key_or_id));
        let query = Query::new()
            .with_opt("transitionId", params.transition_id.as_deref())
            .with_opt("expand", params.expand.as_deref());
        self.transport.get(ApiBase::Core, &path, &query).await
    }

    /// Collect every page of a search, up to `max_total` issues.
    ///
    /// Starts at offset zero regardless of `params.start_at`; `max_results`
    /// acts as the page size. `max_total` defaults to [`DEFAULT_MAX_TOTAL`].
    /// Use with caution for large result sets.
    #[instrument(skip(self, params), fields(jql = %params.jql))]
    pub async fn search_all(
        &self,
        params: &SearchParams,
        max_total: Option<usize>,
    ) -> Result<Vec<Issue>> {
        let limits = TotalLimits::new(max_total.unwrap_or(DEFAULT_MAX_TOTAL))
            .with_page_size(params.max_results);

        let issues = collect_until_total(limits, |page| {
            let mut page_params = params.clone();
            page_params.start_at = Some(page.start_at);
            page_params.max_results = Some(page.max_results);
            async move { self.search(&page_params).await }
        })
        .await?;

        info!(count = issues.len(), "Collected search results");
        Ok(issues)
    }

    /// Count the issues matching `jql` without fetching them.
    ///
    /// Issues one request asking for a single issue with only its key.
    #[instrument(skip(self))]
    pub async fn count(&self, jql: &str) -> Result<u64> {
        let params = SearchParams::new(jql).max_results(1).fields(["key"]);
        let result = self.search(&params).await?;
        Ok(result.total)
    }
}
