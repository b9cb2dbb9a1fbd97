//! Route guards derived from the session state.
//!
//! Guards own no state: they are pure functions of a [`Session`] snapshot.

use strum::EnumIter;
use taskdeck_core::session::{Session, SessionPhase};

/// Navigable screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Route {
    Login,
    Home,
    Tasks,
    Projects,
    Account,
    AdminUsers,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Home => "/",
            Route::Tasks => "/tasks",
            Route::Projects => "/projects",
            Route::Account => "/account",
            Route::AdminUsers => "/admin/users",
        }
    }

    /// Resolves a path; anything unknown lands on `Home`.
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/login" => Route::Login,
            "/tasks" => Route::Tasks,
            "/projects" => Route::Projects,
            "/account" => Route::Account,
            "/admin/users" => Route::AdminUsers,
            _ => Route::Home,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Home => "Home",
            Route::Tasks => "Tasks",
            Route::Projects => "Projects",
            Route::Account => "Account",
            Route::AdminUsers => "Users",
        }
    }

    /// Guard protecting this route; `None` for public routes.
    pub fn guard(self) -> Option<RouteGuard> {
        match self {
            Route::Login => None,
            Route::AdminUsers => Some(RouteGuard::AdminOnly),
            _ => Some(RouteGuard::Protected),
        }
    }

    /// Evaluates this route's guard, granting public routes outright.
    pub fn access(self, session: &Session) -> Access {
        self.guard()
            .map_or(Access::Granted, |guard| guard.evaluate(session))
    }
}

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Identity not confirmed yet; show a placeholder.
    Loading,
    Redirect(Route),
    Granted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGuard {
    /// Requires an authenticated session.
    Protected,
    /// Requires an authenticated admin.
    AdminOnly,
}

impl RouteGuard {
    pub fn evaluate(self, session: &Session) -> Access {
        match session.phase() {
            SessionPhase::Pending => return Access::Loading,
            SessionPhase::Anonymous => return Access::Redirect(Route::Login),
            SessionPhase::Authenticated => {}
        }
        match self {
            RouteGuard::Protected => Access::Granted,
            RouteGuard::AdminOnly => match session.user {
                None => Access::Loading,
                Some(ref user) if user.role.is_admin() => Access::Granted,
                Some(_) => Access::Redirect(Route::Home),
            },
        }
    }
}

/// Navigation entries visible to this session.
pub fn navigation(session: &Session) -> Vec<Route> {
    let mut routes = vec![Route::Home, Route::Tasks, Route::Projects];
    if session.is_admin() {
        routes.push(Route::AdminUsers);
    }
    routes
}
