//! TaskBoard - tasks of the selected project with optimistic edits.

use crate::notifier::Notifier;
use crate::session_manager::SessionManager;
use crate::view::{Field, LoadState, OptimisticList, Ticket, ViewScope};
use std::sync::Arc;
use taskdeck_core::project::{Project, ProjectApi};
use taskdeck_core::session::Session;
use taskdeck_core::task::{Task, TaskApi, TaskStatus};
use taskdeck_core::user::{AssignableUser, UserApi};
use taskdeck_core::{Result, TaskdeckError};
use tokio::sync::RwLock;

const LOAD_PROJECTS_FAILED: &str = "Failed to load projects.";
const LOAD_TASKS_FAILED: &str = "Failed to load tasks.";
const LOAD_USERS_FAILED: &str = "Failed to load users";
const CREATE_TASK_FAILED: &str = "Failed to create task.";
const STATUS_FAILED: &str = "Failed to update task status.";
const ASSIGNEE_FAILED: &str = "Failed to update assignee.";

#[derive(Debug, Default)]
struct BoardState {
    projects: Vec<Project>,
    projects_state: LoadState,
    selected_project: Option<String>,
    tasks_state: LoadState,
    users: Vec<AssignableUser>,
    creating: bool,
}

/// Status may be changed by admins and by the task's assignee.
pub fn can_change_status(session: &Session, task: &Task) -> bool {
    session.is_admin()
        || matches!(
            (session.user_id(), task.assignee_id.as_deref()),
            (Some(me), Some(assignee)) if me == assignee
        )
}

/// Only admins may reassign tasks.
pub fn can_change_assignee(session: &Session) -> bool {
    session.is_admin()
}

/// Task list for one project at a time.
///
/// Fetches are scoped: results that arrive after [`unmount`](Self::unmount)
/// or after another project was selected are dropped.
pub struct TaskBoard {
    session: Arc<SessionManager>,
    projects_api: Arc<dyn ProjectApi>,
    tasks_api: Arc<dyn TaskApi>,
    users_api: Arc<dyn UserApi>,
    notifier: Notifier,
    state: RwLock<BoardState>,
    tasks: OptimisticList<Task>,
    mount_scope: ViewScope,
    task_scope: ViewScope,
}

impl TaskBoard {
    pub fn new(
        session: Arc<SessionManager>,
        projects_api: Arc<dyn ProjectApi>,
        tasks_api: Arc<dyn TaskApi>,
        users_api: Arc<dyn UserApi>,
        notifier: Notifier,
    ) -> Self {
        Self {
            session,
            projects_api,
            tasks_api,
            users_api,
            notifier,
            state: RwLock::new(BoardState::default()),
            tasks: OptimisticList::new(),
            mount_scope: ViewScope::new(),
            task_scope: ViewScope::new(),
        }
    }

    /// Builds a board whose ports are all served by one client.
    pub fn with_client<A>(session: Arc<SessionManager>, api: Arc<A>, notifier: Notifier) -> Self
    where
        A: ProjectApi + TaskApi + UserApi + 'static,
    {
        Self::new(session, api.clone(), api.clone(), api, notifier)
    }

    // ============================================================================
    // Read accessors
    // ============================================================================

    pub async fn projects(&self) -> Vec<Project> {
        self.state.read().await.projects.clone()
    }

    pub async fn projects_state(&self) -> LoadState {
        self.state.read().await.projects_state.clone()
    }

    pub async fn selected_project(&self) -> Option<String> {
        self.state.read().await.selected_project.clone()
    }

    pub async fn tasks(&self) -> Vec<Task> {
        self.tasks.snapshot().await
    }

    pub async fn tasks_state(&self) -> LoadState {
        self.state.read().await.tasks_state.clone()
    }

    pub async fn users(&self) -> Vec<AssignableUser> {
        self.state.read().await.users.clone()
    }

    pub async fn is_creating(&self) -> bool {
        self.state.read().await.creating
    }

    /// Name of the project a task belongs to, for its badge.
    pub async fn project_name(&self, task: &Task) -> Option<String> {
        self.state
            .read()
            .await
            .projects
            .iter()
            .find(|p| p.id == task.project_id)
            .map(|p| p.name.clone())
    }

    // ============================================================================
    // Lifecycle
    // ============================================================================

    /// Loads projects and assignable users concurrently, then selects the
    /// first project (or none).
    pub async fn mount(&self) -> Result<()> {
        let ticket = self.mount_scope.ticket();
        self.state.write().await.projects_state = LoadState::Loading;

        let (projects, users) = tokio::join!(
            self.projects_api.list_projects(),
            self.users_api.list_assignable_users()
        );
        if !ticket.is_live() {
            tracing::debug!(target: "taskdeck::tasks", "Board unmounted; dropping initial load");
            return Ok(());
        }

        let users_result = match users {
            Ok(users) => {
                self.state.write().await.users = users;
                Ok(())
            }
            Err(e) => {
                tracing::debug!(target: "taskdeck::tasks", "Assignable users failed: {}", e);
                self.notifier.show_error(LOAD_USERS_FAILED);
                Err(e)
            }
        };

        match projects {
            Ok(projects) => {
                let first = projects.first().map(|p| p.id.clone());
                {
                    let mut state = self.state.write().await;
                    state.projects = projects;
                    state.projects_state = LoadState::Loaded;
                }
                self.select_project(first.as_deref()).await?;
                users_result
            }
            Err(e) => {
                let message = e.user_message(LOAD_PROJECTS_FAILED);
                self.state.write().await.projects_state = LoadState::Errored(message.clone());
                self.notifier.show_error(message);
                Err(e)
            }
        }
    }

    /// Switches the selected project and reloads its tasks.
    ///
    /// Any task load still in flight for the previous selection is discarded.
    pub async fn select_project(&self, project_id: Option<&str>) -> Result<()> {
        self.task_scope.invalidate();
        let ticket = self.task_scope.ticket();
        {
            let mut state = self.state.write().await;
            state.selected_project = project_id.map(str::to_string);
            state.tasks_state = match project_id {
                Some(_) => LoadState::Loading,
                None => LoadState::Idle,
            };
        }

        match project_id {
            Some(id) => self.load_tasks(id, &ticket).await,
            None => {
                self.tasks.clear().await;
                Ok(())
            }
        }
    }

    /// Drops every fetch still in flight.
    pub fn unmount(&self) {
        self.mount_scope.invalidate();
        self.task_scope.invalidate();
    }

    async fn load_tasks(&self, project_id: &str, ticket: &Ticket) -> Result<()> {
        let result = self.tasks_api.list_tasks(project_id).await;
        if !ticket.is_live() {
            tracing::debug!(target: "taskdeck::tasks", "Discarding stale task list for {}", project_id);
            return Ok(());
        }
        match result {
            Ok(tasks) => {
                self.tasks.replace(tasks).await;
                self.state.write().await.tasks_state = LoadState::Loaded;
                Ok(())
            }
            Err(e) => {
                let message = e.user_message(LOAD_TASKS_FAILED);
                self.state.write().await.tasks_state = LoadState::Errored(message.clone());
                self.notifier.show_error(message);
                Err(e)
            }
        }
    }

    // ============================================================================
    // Mutations
    // ============================================================================

    /// Creates a task in the selected project and reloads the list.
    pub async fn create_task(&self, title: &str) -> Result<Task> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TaskdeckError::validation("Task title is required."));
        }
        let project_id = self
            .selected_project()
            .await
            .ok_or_else(|| TaskdeckError::validation("Select a project first."))?;

        let ticket = self.task_scope.ticket();
        self.state.write().await.creating = true;
        let outcome = async {
            let task = self.tasks_api.create_task(&project_id, title).await?;
            let tasks = self.tasks_api.list_tasks(&project_id).await?;
            Ok::<_, TaskdeckError>((task, tasks))
        }
        .await;
        self.state.write().await.creating = false;

        match outcome {
            Ok((task, tasks)) => {
                if ticket.is_live() {
                    self.tasks.replace(tasks).await;
                }
                tracing::info!(target: "taskdeck::tasks", "Created task {} in {}", task.id, project_id);
                Ok(task)
            }
            Err(e) => {
                self.notifier.show_error(e.user_message(CREATE_TASK_FAILED));
                Err(e)
            }
        }
    }

    pub async fn change_status(&self, task_id: &str, status: TaskStatus) -> Result<()> {
        let task = self.find_task(task_id).await?;
        if !can_change_status(&self.session.snapshot(), &task) {
            return Err(TaskdeckError::forbidden(
                "Only admins or the assignee can change the status of this task.",
            ));
        }

        let api = Arc::clone(&self.tasks_api);
        let result = self
            .tasks
            .mutate(task_id, &Field::task_status(), status, |current| async move {
                api.update_task(&current.id, &current.to_update()).await
            })
            .await;
        if let Err(e) = &result {
            self.notifier.show_error(e.user_message(STATUS_FAILED));
        }
        result
    }

    pub async fn change_assignee(&self, task_id: &str, assignee_id: Option<&str>) -> Result<()> {
        let _ = self.find_task(task_id).await?;
        if !can_change_assignee(&self.session.snapshot()) {
            return Err(TaskdeckError::forbidden("Only admins can reassign tasks."));
        }

        let api = Arc::clone(&self.tasks_api);
        let result = self
            .tasks
            .mutate(
                task_id,
                &Field::task_assignee(),
                assignee_id.map(str::to_string),
                |current| async move { api.update_task(&current.id, &current.to_update()).await },
            )
            .await;
        if let Err(e) = &result {
            self.notifier.show_error(e.user_message(ASSIGNEE_FAILED));
        }
        result
    }

    async fn find_task(&self, task_id: &str) -> Result<Task> {
        self.tasks
            .get(task_id)
            .await
            .ok_or_else(|| TaskdeckError::validation(format!("Unknown task: {task_id}")))
    }
}
