use crate::context::AppContext;
use anyhow::Result;
use colored::Colorize;
use taskdeck_application::{AuthMode, LoginView, Route};

pub async fn login(ctx: &AppContext, email: &str, password: &str) -> Result<()> {
    submit(ctx, AuthMode::Login, email, password).await
}

pub async fn register(ctx: &AppContext, email: &str, password: &str) -> Result<()> {
    submit(ctx, AuthMode::Register, email, password).await
}

async fn submit(ctx: &AppContext, mode: AuthMode, email: &str, password: &str) -> Result<()> {
    ctx.session.bootstrap().await;
    let view = LoginView::new(ctx.session.clone(), ctx.notifier.clone());
    view.submit(mode, email, password).await?;
    if let Some(user) = ctx.session.current_user() {
        println!(
            "Signed in as {} ({})",
            user.email.bold(),
            user.role.label()
        );
    }
    Ok(())
}

pub fn logout(ctx: &AppContext) -> Result<()> {
    ctx.session.logout();
    println!("Signed out");
    Ok(())
}

pub async fn whoami(ctx: &AppContext) -> Result<()> {
    ctx.enter(Route::Home).await?;
    let session = ctx.session.snapshot();
    if let Some(user) = &session.user {
        println!("{} {}", "id:".bright_black(), user.id);
        println!("{} {}", "email:".bright_black(), user.email);
        println!("{} {}", "role:".bright_black(), user.role.label());
    }
    let menu: Vec<&str> = taskdeck_application::navigation(&session)
        .into_iter()
        .map(Route::label)
        .collect();
    println!("{} {}", "screens:".bright_black(), menu.join(", "));
    Ok(())
}
