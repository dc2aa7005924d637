//! Project list.

use std::sync::Arc;

use filmbudget_core::catalog::Project;
use filmbudget_shared::types::ProjectId;
use tracing::info;

use crate::error::ClientResult;
use crate::forms::ProjectForm;
use crate::http::ApiClient;
use crate::scope::ViewScope;

/// Project list controller.
#[derive(Debug)]
pub struct ProjectsPage {
    client: Arc<ApiClient>,
    scope: ViewScope,
    projects: Vec<Project>,
}

impl ProjectsPage {
    /// Opens the page and loads the list.
    pub async fn open(client: Arc<ApiClient>) -> ClientResult<Self> {
        let mut page = Self {
            client,
            scope: ViewScope::new(),
            projects: Vec::new(),
        };
        page.reload().await?;
        Ok(page)
    }

    /// Loaded projects.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Reloads the list.
    pub async fn reload(&mut self) -> ClientResult<()> {
        self.projects = self.scope.run(self.client.projects()).await?;
        Ok(())
    }

    /// Validates and creates a project.
    pub async fn create(&mut self, form: &ProjectForm) -> ClientResult<Project> {
        form.check()?;
        let project = self.scope.run(self.client.create_project(form)).await?;
        info!(project_id = %project.id, "Project created");
        self.reload().await?;
        Ok(project)
    }

    /// Validates and updates a project.
    pub async fn update(&mut self, id: ProjectId, form: &ProjectForm) -> ClientResult<Project> {
        form.check()?;
        let project = self.scope.run(self.client.update_project(id, form)).await?;
        self.reload().await?;
        Ok(project)
    }

    /// Deletes a project.
    pub async fn delete(&mut self, id: ProjectId) -> ClientResult<()> {
        self.scope.run(self.client.delete_project(id)).await?;
        info!(project_id = %id, "Project deleted");
        self.reload().await
    }
}
