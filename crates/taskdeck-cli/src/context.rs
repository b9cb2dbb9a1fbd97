//! Wiring of the client stack for one command invocation.

use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::sync::Arc;
use taskdeck_application::{Access, Notifier, Route, SessionManager};
use taskdeck_core::config::ClientConfig;
use taskdeck_infrastructure::{ConfigLoader, EnvOverrides, FileTokenStore};
use taskdeck_interaction::HttpApiClient;

pub struct AppContext {
    pub config: ClientConfig,
    pub api: Arc<HttpApiClient>,
    pub session: Arc<SessionManager>,
    pub notifier: Notifier,
}

impl AppContext {
    /// Resolves configuration (defaults, file, env, flags) and builds the stack.
    pub fn new(api_url: Option<String>, config_path: Option<PathBuf>) -> Result<Self> {
        let mut overrides = EnvOverrides::from_env();
        if api_url.is_some() {
            overrides.api_base_url = api_url;
        }
        let loader = match config_path {
            Some(path) => ConfigLoader::with_path(path),
            None => ConfigLoader::new(),
        };
        let config = loader
            .load(&overrides)
            .context("Failed to load configuration")?;

        let token_store = Arc::new(match &config.token_file {
            Some(path) => FileTokenStore::with_path(path.clone()),
            None => FileTokenStore::new().context("Failed to locate the token file")?,
        });
        let api = Arc::new(HttpApiClient::new(
            config.api_base_url.clone(),
            token_store.clone(),
        )?);
        let session = Arc::new(SessionManager::new(token_store, api.clone()));
        let notifier = Notifier::new(config.notification_dismiss());

        Ok(Self {
            config,
            api,
            session,
            notifier,
        })
    }

    /// Restores the session and applies the guard of `route`.
    pub async fn enter(&self, route: Route) -> Result<()> {
        self.session.bootstrap().await;
        match route.access(&self.session.snapshot()) {
            Access::Granted => Ok(()),
            Access::Redirect(Route::Login) => {
                bail!("Not signed in. Run `taskdeck login` first.")
            }
            Access::Redirect(target) => bail!(
                "{} requires an admin account (redirected to {})",
                route.label(),
                target.path()
            ),
            Access::Loading => bail!("Session could not be resolved"),
        }
    }
}
