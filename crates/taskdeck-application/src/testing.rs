//! In-memory port fakes shared by the view tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use taskdeck_core::admin::{AdminApi, ExportArchive};
use taskdeck_core::project::{Project, ProjectApi};
use taskdeck_core::session::{AccessToken, AuthApi, AuthUser, Credentials, Role};
use taskdeck_core::task::{Task, TaskApi, TaskStatus, TaskUpdate};
use taskdeck_core::user::{AssignableUser, ManagedUser, RoleUpdate, UserApi};
use taskdeck_core::{Result, TaskdeckError};

/// A request observed by [`FakeApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login(String),
    Register(String),
    Me,
    ChangePassword(String, String),
    ListProjects,
    CreateProject(String),
    ListTasks(String),
    CreateTask(String, String),
    UpdateTask(String, TaskUpdate),
    ListUsers,
    UpdateUserRole(String, RoleUpdate),
    ListAssignableUsers,
    Export,
}

/// Scriptable fake of every API port.
///
/// Each endpoint pops its next scripted response; an unscripted call falls
/// back to a benign default so tests only script what they care about.
#[derive(Default)]
pub struct FakeApi {
    pub calls: Mutex<Vec<Call>>,
    pub login: Mutex<VecDeque<Result<AccessToken>>>,
    pub me: Mutex<VecDeque<Result<AuthUser>>>,
    pub change_password: Mutex<VecDeque<Result<()>>>,
    pub projects: Mutex<VecDeque<Result<Vec<Project>>>>,
    pub created_projects: Mutex<VecDeque<Result<Project>>>,
    pub tasks: Mutex<VecDeque<Result<Vec<Task>>>>,
    pub created_tasks: Mutex<VecDeque<Result<Task>>>,
    pub task_updates: Mutex<VecDeque<Result<()>>>,
    pub users: Mutex<VecDeque<Result<Vec<ManagedUser>>>>,
    pub role_updates: Mutex<VecDeque<Result<()>>>,
    pub assignable: Mutex<VecDeque<Result<Vec<AssignableUser>>>>,
    pub exports: Mutex<VecDeque<Result<ExportArchive>>>,
}

fn next<T>(queue: &Mutex<VecDeque<Result<T>>>, default: impl FnOnce() -> Result<T>) -> Result<T> {
    queue.lock().unwrap().pop_front().unwrap_or_else(default)
}

pub fn push<T>(queue: &Mutex<VecDeque<Result<T>>>, value: Result<T>) {
    queue.lock().unwrap().push_back(value);
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn update_calls(&self) -> Vec<(String, TaskUpdate)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::UpdateTask(id, update) => Some((id, update)),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl AuthApi for FakeApi {
    async fn login(&self, credentials: &Credentials) -> Result<AccessToken> {
        self.record(Call::Login(credentials.email.clone()));
        next(&self.login, || Err(TaskdeckError::api_status(401)))
    }

    async fn register(&self, credentials: &Credentials) -> Result<AccessToken> {
        self.record(Call::Register(credentials.email.clone()));
        next(&self.login, || Err(TaskdeckError::api_status(400)))
    }

    async fn me(&self) -> Result<AuthUser> {
        self.record(Call::Me);
        next(&self.me, || Err(TaskdeckError::api_status(401)))
    }

    async fn change_password(&self, current_password: &str, new_password: &str) -> Result<()> {
        self.record(Call::ChangePassword(
            current_password.to_string(),
            new_password.to_string(),
        ));
        next(&self.change_password, || Ok(()))
    }
}

#[async_trait]
impl ProjectApi for FakeApi {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        self.record(Call::ListProjects);
        next(&self.projects, || Ok(Vec::new()))
    }

    async fn create_project(&self, name: &str) -> Result<Project> {
        self.record(Call::CreateProject(name.to_string()));
        next(&self.created_projects, || Ok(project("p-new", name)))
    }
}

#[async_trait]
impl TaskApi for FakeApi {
    async fn list_tasks(&self, project_id: &str) -> Result<Vec<Task>> {
        self.record(Call::ListTasks(project_id.to_string()));
        next(&self.tasks, || Ok(Vec::new()))
    }

    async fn create_task(&self, project_id: &str, title: &str) -> Result<Task> {
        self.record(Call::CreateTask(project_id.to_string(), title.to_string()));
        next(&self.created_tasks, || {
            Ok(task("t-new", project_id, TaskStatus::Todo, None))
        })
    }

    async fn update_task(&self, task_id: &str, update: &TaskUpdate) -> Result<()> {
        self.record(Call::UpdateTask(task_id.to_string(), update.clone()));
        next(&self.task_updates, || Ok(()))
    }
}

#[async_trait]
impl UserApi for FakeApi {
    async fn list_users(&self) -> Result<Vec<ManagedUser>> {
        self.record(Call::ListUsers);
        next(&self.users, || Ok(Vec::new()))
    }

    async fn update_user_role(&self, user_id: &str, update: &RoleUpdate) -> Result<()> {
        self.record(Call::UpdateUserRole(user_id.to_string(), update.clone()));
        next(&self.role_updates, || Ok(()))
    }

    async fn list_assignable_users(&self) -> Result<Vec<AssignableUser>> {
        self.record(Call::ListAssignableUsers);
        next(&self.assignable, || Ok(Vec::new()))
    }
}

#[async_trait]
impl AdminApi for FakeApi {
    async fn export_data(&self) -> Result<ExportArchive> {
        self.record(Call::Export);
        next(&self.exports, || Err(TaskdeckError::api_status(403)))
    }
}

pub fn user(id: &str, email: &str, role: Role) -> AuthUser {
    AuthUser {
        id: id.into(),
        email: email.into(),
        role,
    }
}

pub fn project(id: &str, name: &str) -> Project {
    Project {
        id: id.into(),
        name: name.into(),
    }
}

pub fn task(id: &str, project_id: &str, status: TaskStatus, assignee: Option<&str>) -> Task {
    Task {
        id: id.into(),
        project_id: project_id.into(),
        title: format!("Task {id}"),
        description: Some("details".into()),
        status,
        assignee_id: assignee.map(str::to_string),
        created_at: None,
        updated_at: None,
    }
}
