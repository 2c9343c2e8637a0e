//! Agile boards and sprints (`/rest/agile/1.0`).

use tracing::{debug, instrument};

use super::error::Result;
use super::pagination::{clamp_page_size, collect_until_last, MAX_PAGE_SIZE};
use super::transport::{ApiBase, Query, Transport};
use super::types::{Board, BoardType, Issue, SearchResults, Sprint, SprintState, ValuesPage};
use crate::config::ClientConfig;

/// Parameters for [`AgileApi::get_boards`].
#[derive(Debug, Clone, Default)]
pub struct GetBoardsParams {
    /// Only boards of this project (key or id).
    pub project_key_or_id: Option<String>,
    /// Only boards of this type.
    pub board_type: Option<BoardType>,
    /// Only boards whose name contains this text.
    pub name: Option<String>,
    /// Index of the first board.
    pub start_at: Option<u32>,
    /// Page size. When set, exactly one page is fetched; when unset every
    /// page is collected.
    pub max_results: Option<u32>,
}

impl GetBoardsParams {
    fn filters(&self) -> Query {
        Query::new()
            .with_opt("projectKeyOrId", self.project_key_or_id.as_deref())
            .with_opt("type", self.board_type.map(BoardType::as_str))
            .with_opt("name", self.name.as_deref())
    }
}

/// Parameters for [`AgileApi::get_sprints`].
#[derive(Debug, Clone)]
pub struct GetSprintsParams {
    /// The board whose sprints to list.
    pub board_id: u64,
    /// Only sprints in this state.
    pub state: Option<SprintState>,
    /// Index of the first sprint.
    pub start_at: Option<u32>,
    /// Page size. When set, exactly one page is fetched; when unset every
    /// page is collected.
    pub max_results: Option<u32>,
}

impl GetSprintsParams {
    /// All sprints of `board_id`.
    pub fn new(board_id: u64) -> Self {
        Self {
            board_id,
            state: None,
            start_at: None,
            max_results: None,
        }
    }

    /// Restrict to sprints in `state`.
    pub fn with_state(mut self, state: SprintState) -> Self {
        self.state = Some(state);
        self
    }
}

/// Parameters for [`AgileApi::get_sprint_issues`].
#[derive(Debug, Clone)]
pub struct GetSprintIssuesParams {
    /// The sprint id.
    pub sprint_id: u64,
    /// Index of the first issue.
    pub start_at: u32,
    /// Page size; capped at 50.
    pub max_results: u32,
    /// Fields to return.
    pub fields: Option<Vec<String>>,
    /// Entities to expand.
    pub expand: Option<String>,
    /// JQL further filtering the sprint's issues.
    pub jql: Option<String>,
}

impl GetSprintIssuesParams {
    /// First page of issues in `sprint_id`.
    pub fn new(sprint_id: u64) -> Self {
        Self {
            sprint_id,
            start_at: 0,
            max_results: MAX_PAGE_SIZE,
            fields: None,
            expand: None,
            jql: None,
        }
    }
}

/// Agile API methods (boards, sprints).
#[derive(Debug, Clone)]
pub struct AgileApi {
    transport: Transport,
}

impl AgileApi {
    /// Create the agile API from a connection configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(config)?,
        })
    }

    /// Get boards visible to the user, optionally filtered.
    ///
    /// Collects every page unless `max_results` is set.
    #[instrument(skip(self))]
    pub async fn get_boards(&self, params: &GetBoardsParams) -> Result<Vec<Board>> {
        let filters = params.filters();
        let boards = collect_until_last(
            params.start_at.unwrap_or(0),
            params.max_results,
            |page| {
                let query = filters
                    .clone()
                    .with("startAt", page.start_at)
                    .with("maxResults", page.max_results);
                async move {
                    self.transport
                        .get::<ValuesPage<Board>>(ApiBase::Agile, "/board", &query)
                        .await
                }
            },
        )
        .await?;

        debug!("Fetched {} boards", boards.len());
        Ok(boards)
    }

    /// Get a board by id.
    #[instrument(skip(self))]
    pub async fn get_board(&self, board_id: u64) -> Result<Board> {
        let path = format!("/board/{}", board_id);
        self.transport
            .get(ApiBase::Agile, &path, &Query::new())
            .await
    }

    /// Get the sprints of a board, optionally filtered by state.
    ///
    /// Collects every page unless `max_results` is set.
    #[instrument(skip(self))]
    pub async fn get_sprints(&self, params: &GetSprintsParams) -> Result<Vec<Sprint>> {
        let path = format!("/board/{}/sprint", params.board_id);
        let filters = Query::new().with_opt("state", params.state.map(SprintState::as_str));

        let sprints = collect_until_last(
            params.start_at.unwrap_or(0),
            params.max_results,
            |page| {
                let query = filters
                    .clone()
                    .with("startAt", page.start_at)
                    .with("maxResults", page.max_results);
                let path = path.as_str();
                async move {
                    self.transport
                        .get::<ValuesPage<Sprint>>(ApiBase::Agile, path, &query)
                        .await
                }
            },
        )
        .await?;

        debug!("Fetched {} sprints", sprints.len());
        Ok(sprints)
    }

    /// Get one page of the issues in a sprint.
    #[instrument(skip(self))]
    pub async fn get_sprint_issues(
        &self,
        params: &GetSprintIssuesParams,
    ) -> Result<SearchResults<Issue>> {
        let path = format!("/sprint/{}/issue", params.sprint_id);
        let query = Query::new()
            .with("startAt", params.start_at)
            .with("maxResults", clamp_page_size(params.max_results))
            .with_opt("fields", params.fields.as_ref().map(|f| f.join(",")))
            .with_opt("expand", params.expand.as_deref())
            .with_opt("jql", params.jql.as_deref());

        let result: SearchResults<Issue> = self.transport.get(ApiBase::Agile, &path, &query).await?;
        debug!("Found {} issues (total: {})", result.issues.len(), result.total);
        Ok(result)
    }
}
