use super::AccountAction;
use crate::context::AppContext;
use anyhow::{Result, anyhow};
use colored::Colorize;
use taskdeck_application::{AccountView, Route};

pub async fn run(ctx: &AppContext, action: AccountAction) -> Result<()> {
    ctx.enter(Route::Account).await?;
    let mut view = AccountView::new(
        ctx.session.clone(),
        ctx.api.clone(),
        ctx.api.clone(),
        ctx.notifier.clone(),
    );

    match action {
        AccountAction::Password {
            current,
            new,
            confirm,
        } => {
            if let Err(e) = view.change_password(&current, &new, &confirm).await {
                tracing::debug!(target: "taskdeck::account", "Password change failed: {}", e);
                return Err(match view.error() {
                    Some(message) => anyhow!("{}", message),
                    None => e.into(),
                });
            }
            if let Some(message) = view.success() {
                println!("{}", message.green());
            }
        }
    }
    Ok(())
}
