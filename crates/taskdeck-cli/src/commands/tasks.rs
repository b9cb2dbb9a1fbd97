use super::TaskAction;
use crate::context::AppContext;
use anyhow::{Result, anyhow, bail};
use colored::Colorize;
use std::str::FromStr;
use taskdeck_application::{Route, TaskBoard};
use taskdeck_core::task::{Task, TaskStatus};
use taskdeck_core::user::AssignableUser;

pub async fn run(ctx: &AppContext, action: TaskAction) -> Result<()> {
    ctx.enter(Route::Tasks).await?;
    let board = TaskBoard::with_client(ctx.session.clone(), ctx.api.clone(), ctx.notifier.clone());

    match action {
        TaskAction::List { project } => {
            open(&board, project.as_deref()).await?;
            print_board(&board).await;
        }
        TaskAction::Create { project, title } => {
            open(&board, Some(&project)).await?;
            let task = board.create_task(&title).await?;
            println!("{} {} ({})", "Created".green(), task.title, task.id.bright_black());
        }
        TaskAction::Status {
            project,
            task,
            status,
        } => {
            let status = TaskStatus::from_str(&status)
                .map_err(|_| anyhow!("Unknown status '{}' (todo, in_progress, done)", status))?;
            open(&board, Some(&project)).await?;
            board.change_status(&task, status).await?;
            println!("{} is now {}", task, status.label().bold());
        }
        TaskAction::Assign {
            project,
            task,
            user,
        } => {
            open(&board, Some(&project)).await?;
            board.change_assignee(&task, user.as_deref()).await?;
            match user {
                Some(user) => println!("{} assigned to {}", task, user),
                None => println!("{} unassigned", task),
            }
        }
    }
    board.unmount();
    Ok(())
}

/// Mounts the board and switches to `project` when one is given.
async fn open(board: &TaskBoard, project: Option<&str>) -> Result<()> {
    if let Err(e) = board.mount().await {
        // Already reported; the board stays usable when only users failed.
        tracing::debug!(target: "taskdeck::tasks", "Board mount incomplete: {}", e);
        if board.projects_state().await.error().is_some() {
            return Err(e.into());
        }
    }
    match project {
        Some(id) => {
            if !board.projects().await.iter().any(|p| p.id == id) {
                bail!("Unknown project '{}'", id);
            }
            board.select_project(Some(id)).await?;
        }
        None if board.selected_project().await.is_none() => bail!("No projects yet"),
        None => {}
    }
    Ok(())
}

async fn print_board(board: &TaskBoard) {
    let tasks = board.tasks().await;
    let users = board.users().await;
    if let Some(first) = tasks.first() {
        if let Some(name) = board.project_name(first).await {
            println!("{}", name.bold());
        }
    }
    if tasks.is_empty() {
        println!("{}", "No tasks yet.".bright_black());
    }
    for task in &tasks {
        println!(
            "{}  {:<11}  {}  {}",
            task.id.bright_black(),
            task.status.label(),
            task.title,
            assignee_label(task, &users).bright_black()
        );
    }
}

fn assignee_label(task: &Task, users: &[AssignableUser]) -> String {
    match &task.assignee_id {
        None => "unassigned".to_string(),
        Some(id) => users
            .iter()
            .find(|u| &u.id == id)
            .map_or_else(|| id.clone(), |u| u.email.clone()),
    }
}
