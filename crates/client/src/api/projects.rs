//! Project endpoints.

use filmbudget_core::catalog::Project;
use filmbudget_shared::types::ProjectId;

use crate::error::ClientResult;
use crate::forms::ProjectForm;
use crate::http::ApiClient;

impl ApiClient {
    /// All projects visible to the user.
    pub async fn projects(&self) -> ClientResult<Vec<Project>> {
        self.get("/projects").await
    }

    /// One project.
    pub async fn project(&self, id: ProjectId) -> ClientResult<Project> {
        self.get(&format!("/projects/{id}")).await
    }

    /// Creates a project.
    pub async fn create_project(&self, form: &ProjectForm) -> ClientResult<Project> {
        self.post("/projects", form).await
    }

    /// Updates a project.
    pub async fn update_project(&self, id: ProjectId, form: &ProjectForm) -> ClientResult<Project> {
        self.patch(&format!("/projects/{id}"), form).await
    }

    /// Deletes a project with its budget.
    pub async fn delete_project(&self, id: ProjectId) -> ClientResult<()> {
        self.delete(&format!("/projects/{id}")).await
    }
}
