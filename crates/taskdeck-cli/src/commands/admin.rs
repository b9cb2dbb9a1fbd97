use super::AdminAction;
use crate::context::AppContext;
use anyhow::{Context, Result};
use taskdeck_application::{AccountView, Route};

pub async fn run(ctx: &AppContext, action: AdminAction) -> Result<()> {
    // The export lives on the account screen.
    ctx.enter(Route::Account).await?;
    let view = AccountView::new(
        ctx.session.clone(),
        ctx.api.clone(),
        ctx.api.clone(),
        ctx.notifier.clone(),
    );

    match action {
        AdminAction::Export { out } => {
            let dir = match out {
                Some(dir) => dir,
                None => std::env::current_dir().context("Failed to resolve current directory")?,
            };
            let path = view.export_data(&dir).await?;
            println!("Export written to {}", path.display());
        }
    }
    Ok(())
}
