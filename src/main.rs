//! jiradc - command-line access to a Jira Server/Data Center instance.
//!
//! Every subcommand maps to one client operation and prints its result as
//! pretty JSON on stdout.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use jira_dc::api::types::{BoardType, SprintState};
use jira_dc::api::{
    GetBoardsParams, GetIssueParams, GetProjectParams, GetProjectsParams, GetSprintIssuesParams,
    GetSprintsParams, GetTransitionsParams, GetUserParams, SearchParams, SearchUsersParams,
    DEFAULT_MAX_TOTAL, DEFAULT_SEARCH_LIMIT,
};
use jira_dc::config::Config;
use jira_dc::error::{AppError, Result};
use jira_dc::{logging, ConnectionStatus, JiraClient};

#[derive(Debug, Parser)]
#[command(name = "jiradc", version, about = "Query Jira Server/Data Center from the terminal")]
struct Cli {
    /// Profile from the configuration file to use.
    #[arg(short, long, global = true)]
    profile: Option<String>,

    /// Path to the configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Mirror debug logs to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check the connection and credentials.
    Check,
    /// Show the authenticated user.
    Myself {
        #[arg(long)]
        expand: Option<String>,
    },
    /// Show a user by username (or by key with --key).
    User {
        name: String,
        #[arg(long)]
        key: bool,
    },
    /// Search users by username, name or email.
    UserSearch {
        query: String,
        #[arg(long, default_value_t = 50)]
        max_results: u32,
        #[arg(long)]
        include_inactive: bool,
    },
    /// List projects.
    Projects {
        #[arg(long)]
        archived: bool,
        #[arg(long)]
        expand: Option<String>,
    },
    /// Show a project.
    Project { key: String },
    /// Search issues with JQL.
    Search {
        jql: String,
        /// Comma-separated field list.
        #[arg(long, value_delimiter = ',')]
        fields: Option<Vec<String>>,
        #[arg(long)]
        start_at: Option<u32>,
        #[arg(long)]
        max_results: Option<u32>,
        /// Collect every page.
        #[arg(long)]
        all: bool,
        /// Upper bound on issues collected with --all.
        #[arg(long, default_value_t = DEFAULT_MAX_TOTAL)]
        max_total: usize,
        /// Send the search as a POST body.
        #[arg(long, conflicts_with = "all")]
        post: bool,
    },
    /// Count issues matching JQL.
    Count { jql: String },
    /// Show an issue.
    Issue {
        key: String,
        #[arg(long, value_delimiter = ',')]
        fields: Option<Vec<String>>,
        #[arg(long)]
        expand: Option<String>,
    },
    /// List the transitions available on an issue.
    Transitions { key: String },
    /// List field definitions.
    Fields {
        /// Only custom fields.
        #[arg(long)]
        custom: bool,
        /// Bypass the cache.
        #[arg(long)]
        refresh: bool,
    },
    /// Resolve a field name, id or clause name to its id.
    FieldId { name: String },
    /// Find fields by keyword.
    FieldSearch {
        keyword: String,
        #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },
    /// List agile boards.
    Boards {
        #[arg(long)]
        project: Option<String>,
        #[arg(long = "type")]
        board_type: Option<BoardType>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        max_results: Option<u32>,
    },
    /// Show a board.
    Board { id: u64 },
    /// List the sprints of a board.
    Sprints {
        board_id: u64,
        #[arg(long)]
        state: Option<SprintState>,
    },
    /// List the issues of a sprint.
    SprintIssues {
        sprint_id: u64,
        #[arg(long)]
        jql: Option<String>,
        #[arg(long, default_value_t = 0)]
        start_at: u32,
        #[arg(long, default_value_t = 50)]
        max_results: u32,
    },
    /// List issue link types.
    LinkTypes,
    /// Show an issue link type.
    LinkType { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {}", e.user_message());
        if let Some(action) = e.suggested_action() {
            eprintln!("Hint: {}", action);
        }
        std::process::exit(e.exit_code());
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let client = JiraClient::new(config.resolve(cli.profile.as_deref())?)?;

    match cli.command {
        Command::Check => match client.test_connection().await {
            ConnectionStatus::Connected(user) => print_json(&serde_json::json!({
                "connected": true,
                "user": user,
            })),
            ConnectionStatus::Failed { message } => {
                print_json(&serde_json::json!({
                    "connected": false,
                    "error": message,
                }))?;
                Err(AppError::other("Connection check failed"))
            }
        },
        Command::Myself { expand } => {
            print_json(&client.users.get_myself(expand.as_deref()).await?)
        }
        Command::User { name, key } => {
            let params = if key {
                GetUserParams::by_key(name)
            } else {
                GetUserParams::by_username(name)
            };
            print_json(&client.users.get_user(&params).await?)
        }
        Command::UserSearch {
            query,
            max_results,
            include_inactive,
        } => {
            let params = SearchUsersParams {
                max_results,
                include_inactive,
                ..SearchUsersParams::new(query)
            };
            print_json(&client.users.search_users(&params).await?)
        }
        Command::Projects { archived, expand } => {
            let params = GetProjectsParams {
                expand,
                include_archived: archived,
            };
            print_json(&client.projects.get_all(&params).await?)
        }
        Command::Project { key } => {
            print_json(&client.projects.get(&GetProjectParams::new(key)).await?)
        }
        Command::Search {
            jql,
            fields,
            start_at,
            max_results,
            all,
            max_total,
            post,
        } => {
            let mut params = SearchParams::new(jql);
            params.start_at = start_at;
            params.max_results = max_results;
            params.fields = fields;

            if all {
                print_json(&client.issues.search_all(&params, Some(max_total)).await?)
            } else if post {
                print_json(&client.issues.search_post(&params).await?)
            } else {
                print_json(&client.issues.search(&params).await?)
            }
        }
        Command::Count { jql } => print_json(&client.issues.count(&jql).await?),
        Command::Issue {
            key,
            fields,
            expand,
        } => {
            let params = GetIssueParams {
                fields,
                expand,
                ..GetIssueParams::new(key)
            };
            print_json(&client.issues.get(&params).await?)
        }
        Command::Transitions { key } => {
            let params = GetTransitionsParams::new(key);
            print_json(&client.issues.get_transitions(&params).await?)
        }
        Command::Fields { custom, refresh } => {
            let fields = if custom {
                client.fields.get_custom(refresh).await?
            } else {
                client.fields.get_all(refresh).await?
            };
            print_json(&fields)
        }
        Command::FieldId { name } => print_json(&client.fields.get_id_by_name(&name).await?),
        Command::FieldSearch { keyword, limit } => {
            print_json(&client.fields.search(&keyword, limit).await?)
        }
        Command::Boards {
            project,
            board_type,
            name,
            max_results,
        } => {
            let params = GetBoardsParams {
                project_key_or_id: project,
                board_type,
                name,
                start_at: None,
                max_results,
            };
            print_json(&client.agile.get_boards(&params).await?)
        }
        Command::Board { id } => print_json(&client.agile.get_board(id).await?),
        Command::Sprints { board_id, state } => {
            let mut params = GetSprintsParams::new(board_id);
            params.state = state;
            print_json(&client.agile.get_sprints(&params).await?)
        }
        Command::SprintIssues {
            sprint_id,
            jql,
            start_at,
            max_results,
        } => {
            let params = GetSprintIssuesParams {
                jql,
                start_at,
                max_results,
                ..GetSprintIssuesParams::new(sprint_id)
            };
            print_json(&client.agile.get_sprint_issues(&params).await?)
        }
        Command::LinkTypes => print_json(&client.links.get_types().await?),
        Command::LinkType { id } => print_json(&client.links.get_type(&id).await?),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::other(format!("Failed to serialize output: {}", e)))?;
    println!("{}", out);
    Ok(())
}
