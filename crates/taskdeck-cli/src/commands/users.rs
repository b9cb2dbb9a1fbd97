use super::UserAction;
use crate::context::AppContext;
use anyhow::Result;
use colored::Colorize;
use taskdeck_application::{Route, UserAdminView};
use taskdeck_core::session::Role;

pub async fn run(ctx: &AppContext, action: UserAction) -> Result<()> {
    ctx.enter(Route::AdminUsers).await?;
    let view = UserAdminView::new(ctx.session.clone(), ctx.api.clone(), ctx.notifier.clone());
    view.load().await?;

    match action {
        UserAction::List => {
            for user in view.sorted_users().await {
                let marker = if view.is_self(&user) { " (you)" } else { "" };
                let joined = user
                    .created_at
                    .map(|at| at.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                println!(
                    "{}  {:<32}  {:<6}  {}{}",
                    user.id.bright_black(),
                    user.email,
                    user.role.label(),
                    joined.bright_black(),
                    marker.bright_black()
                );
            }
        }
        UserAction::Role { id, role } => {
            view.change_role(&id, Role::from(role.as_str())).await?;
        }
    }
    Ok(())
}
