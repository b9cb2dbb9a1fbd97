//! Subcommand handlers, one module per screen.

use clap::Subcommand;
use std::path::PathBuf;

pub mod account;
pub mod admin;
pub mod auth;
pub mod projects;
pub mod tasks;
pub mod users;

#[derive(Subcommand)]
pub enum ProjectAction {
    /// List all projects
    List,
    /// Create a project
    Create { name: String },
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// List the tasks of a project (defaults to the first project)
    List {
        #[arg(long)]
        project: Option<String>,
    },
    /// Create a task
    Create {
        #[arg(long)]
        project: String,
        title: String,
    },
    /// Move a task to another status
    Status {
        #[arg(long)]
        project: String,
        task: String,
        /// todo, in_progress or done
        status: String,
    },
    /// Assign a task to a user, or unassign it when --user is omitted
    Assign {
        #[arg(long)]
        project: String,
        task: String,
        #[arg(long)]
        user: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// List every account with its role
    List,
    /// Change the role of an account
    Role { id: String, role: String },
}

#[derive(Subcommand)]
pub enum AccountAction {
    /// Change the password of the signed-in account
    Password {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
}

#[derive(Subcommand)]
pub enum AdminAction {
    /// Download the data export archive
    Export {
        /// Target directory (defaults to the current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}
