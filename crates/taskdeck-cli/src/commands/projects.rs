use super::ProjectAction;
use crate::context::AppContext;
use anyhow::{Result, anyhow};
use colored::Colorize;
use taskdeck_application::{ProjectsView, Route};

pub async fn run(ctx: &AppContext, action: ProjectAction) -> Result<()> {
    ctx.enter(Route::Projects).await?;
    let mut view = ProjectsView::new(ctx.api.clone());

    match action {
        ProjectAction::List => {
            if let Err(e) = view.load().await {
                return Err(inline_error(&view, e));
            }
            if view.projects().is_empty() {
                println!("{}", "No projects yet.".bright_black());
            }
            for project in view.projects() {
                println!("{}  {}", project.id.bright_black(), project.name);
            }
        }
        ProjectAction::Create { name } => {
            let project = match view.create(&name).await {
                Ok(project) => project,
                Err(e) => return Err(inline_error(&view, e)),
            };
            println!(
                "{} {} ({})",
                "Created".green(),
                project.name,
                project.id.bright_black()
            );
            if let Some(message) = view.error() {
                eprintln!("{}", message.yellow());
            }
        }
    }
    Ok(())
}

fn inline_error(view: &ProjectsView, err: taskdeck_core::TaskdeckError) -> anyhow::Error {
    tracing::debug!(target: "taskdeck::projects", "{}", err);
    match view.error() {
        Some(message) => anyhow!("{}", message),
        None => err.into(),
    }
}
