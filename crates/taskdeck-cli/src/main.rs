use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod context;
mod logging;
mod render;

use commands::{AccountAction, AdminAction, ProjectAction, TaskAction, UserAction};
use context::AppContext;
use taskdeck_core::TaskdeckError;

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(about = "taskdeck - command-line client for the task management API", long_about = None)]
struct Cli {
    /// Base URL of the API (overrides config and TASKDECK_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Path to an alternative config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the access token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TASKDECK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TASKDECK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored access token
    Logout,
    /// Show the signed-in identity
    Whoami,
    /// List or create projects
    Projects {
        #[command(subcommand)]
        action: ProjectAction,
    },
    /// Work with the tasks of a project
    Tasks {
        #[command(subcommand)]
        action: TaskAction,
    },
    /// Manage user roles (admin only)
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Account settings
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Administrative tools
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let ctx = match AppContext::new(cli.api_url.clone(), cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            render::error(&e);
            return ExitCode::FAILURE;
        }
    };
    let _log_guard = logging::init(&ctx.config);

    let mut events = ctx.notifier.events();
    let result = match cli.command {
        Commands::Login { email, password } => commands::auth::login(&ctx, &email, &password).await,
        Commands::Register { email, password } => {
            commands::auth::register(&ctx, &email, &password).await
        }
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Whoami => commands::auth::whoami(&ctx).await,
        Commands::Projects { action } => commands::projects::run(&ctx, action).await,
        Commands::Tasks { action } => commands::tasks::run(&ctx, action).await,
        Commands::Users { action } => commands::users::run(&ctx, action).await,
        Commands::Account { action } => commands::account::run(&ctx, action).await,
        Commands::Admin { action } => commands::admin::run(&ctx, action).await,
    };
    let errors_shown = render::drain(&mut events);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if errors_shown == 0 || !was_notified(&e) {
                render::error(&e);
            }
            ExitCode::FAILURE
        }
    }
}

/// Views report request failures through the notifier; validation and
/// permission errors are returned without a notification.
fn was_notified(err: &anyhow::Error) -> bool {
    err.downcast_ref::<TaskdeckError>()
        .is_some_and(|e| !e.is_validation() && !e.is_forbidden())
}
