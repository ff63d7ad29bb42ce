use std::path::PathBuf;

use clap::{Parser, Subcommand};
use impacthub_domain::project::{ProjectSort, ALL_AREAS};
use impacthub_domain::ProjectId;

#[derive(Parser, Debug)]
#[command(name = "impacthub", version, about = "Browse, support and fund ImpactHub projects")]
pub struct Cli {
    /// Backend base URL, e.g. http://localhost:8000/api
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory for the session database and logs
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Also log to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and remember the session
    Login {
        username: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account
    Register {
        username: String,
        email: String,
        /// Read from stdin (twice) when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Check the stored session against the backend
    Status,
    /// Browse and create projects
    Projects {
        #[command(subcommand)]
        action: ProjectCommand,
    },
    /// Support a project
    Support { project: ProjectId },
    /// Read or write project comments
    Comments {
        #[command(subcommand)]
        action: CommentCommand,
    },
    /// Your projects, supported projects and impact stats
    Dashboard,
    /// Donate to a project through the payment gateway
    Donate {
        project: ProjectId,
        /// Amount in rupees, e.g. 250 or 99.50 (default 100)
        #[arg(long)]
        amount: Option<String>,
    },
    /// Your donation history
    Donations,
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    List {
        /// Only titles containing this text, ignoring case
        #[arg(long)]
        search: Option<String>,
        /// Only this impact area, e.g. environmental
        #[arg(long, default_value = ALL_AREAS)]
        area: String,
        /// recent, supported or alpha
        #[arg(long, default_value = "recent")]
        sort: ProjectSort,
    },
    Show {
        id: ProjectId,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        impact_area: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        image_url: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CommentCommand {
    List { project: ProjectId },
    Add { project: ProjectId, content: String },
}
