use crate::view::LoadState;
use std::sync::Arc;
use taskdeck_core::project::{Project, ProjectApi};
use taskdeck_core::{Result, TaskdeckError};

const LOAD_FAILED: &str = "Failed to load projects.";
const CREATE_FAILED: &str = "Failed to create project.";

/// Project list with an inline create form.
///
/// Errors are shown inline on the view rather than through the notifier.
pub struct ProjectsView {
    api: Arc<dyn ProjectApi>,
    projects: Vec<Project>,
    state: LoadState,
    creating: bool,
    error: Option<String>,
}

impl ProjectsView {
    pub fn new(api: Arc<dyn ProjectApi>) -> Self {
        Self {
            api,
            projects: Vec::new(),
            state: LoadState::Idle,
            creating: false,
            error: None,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn load(&mut self) -> Result<()> {
        self.state = LoadState::Loading;
        self.error = None;
        match self.api.list_projects().await {
            Ok(projects) => {
                self.projects = projects;
                self.state = LoadState::Loaded;
                Ok(())
            }
            Err(e) => {
                tracing::debug!(target: "taskdeck::projects", "Project load failed: {}", e);
                self.state = LoadState::Errored(LOAD_FAILED.to_string());
                self.error = Some(LOAD_FAILED.to_string());
                Err(e)
            }
        }
    }

    /// Creates a project and reloads the list.
    ///
    /// A failed reload only sets the inline load error; the project exists,
    /// so the creation still succeeds.
    pub async fn create(&mut self, name: &str) -> Result<Project> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TaskdeckError::validation("Project name is required."));
        }

        self.creating = true;
        self.error = None;
        let result = match self.api.create_project(name).await {
            Ok(project) => {
                tracing::info!(target: "taskdeck::projects", "Created project {}", project.id);
                if let Err(e) = self.load().await {
                    tracing::debug!(target: "taskdeck::projects", "Reload after create failed: {}", e);
                }
                Ok(project)
            }
            Err(e) => {
                self.error = Some(CREATE_FAILED.to_string());
                Err(e)
            }
        };
        self.creating = false;
        result
    }
}
