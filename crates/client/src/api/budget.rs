//! Budget tree endpoints.

use filmbudget_core::budget::{BudgetLine, BudgetTree, Category, Subcategory};
use filmbudget_core::grid::LineUpdate;
use filmbudget_shared::types::{CategoryId, LineId, ProjectId, SubcategoryId};
use tracing::info;

use crate::error::ClientResult;
use crate::forms::{CategoryForm, LineForm, SubcategoryForm};
use crate::http::ApiClient;

fn budget_path(project: ProjectId) -> String {
    format!("/projects/{project}/budget")
}

impl ApiClient {
    /// Full budget tree of a project.
    pub async fn budget_tree(&self, project: ProjectId) -> ClientResult<BudgetTree> {
        self.get(&budget_path(project)).await
    }

    // ========================================================================
    // Categories and subcategories
    // ========================================================================

    /// Creates a category.
    pub async fn create_category(&self, project: ProjectId, form: &CategoryForm) -> ClientResult<Category> {
        self.post(&format!("{}/categories", budget_path(project)), form).await
    }

    /// Renames or moves a category.
    pub async fn update_category(
        &self,
        project: ProjectId,
        category: CategoryId,
        form: &CategoryForm,
    ) -> ClientResult<Category> {
        self.patch(&format!("{}/categories/{category}", budget_path(project)), form)
            .await
    }

    /// Deletes a category with everything below it.
    pub async fn delete_category(&self, project: ProjectId, category: CategoryId) -> ClientResult<()> {
        self.delete(&format!("{}/categories/{category}", budget_path(project)))
            .await
    }

    /// Creates a subcategory.
    pub async fn create_subcategory(
        &self,
        project: ProjectId,
        form: &SubcategoryForm,
    ) -> ClientResult<Subcategory> {
        self.post(&format!("{}/subcategories", budget_path(project)), form)
            .await
    }

    /// Deletes a subcategory with its lines.
    pub async fn delete_subcategory(
        &self,
        project: ProjectId,
        subcategory: SubcategoryId,
    ) -> ClientResult<()> {
        self.delete(&format!("{}/subcategories/{subcategory}", budget_path(project)))
            .await
    }

    // ========================================================================
    // Lines
    // ========================================================================

    /// Creates a line.
    pub async fn create_line(&self, project: ProjectId, form: &LineForm) -> ClientResult<BudgetLine> {
        self.post(&format!("{}/lines", budget_path(project)), form).await
    }

    /// Sends a partial update of one line.
    pub async fn update_line(
        &self,
        project: ProjectId,
        line: LineId,
        update: &LineUpdate,
    ) -> ClientResult<BudgetLine> {
        self.patch(&format!("{}/lines/{line}", budget_path(project)), update)
            .await
    }

    /// Deletes a line.
    pub async fn delete_line(&self, project: ProjectId, line: LineId) -> ClientResult<()> {
        self.delete(&format!("{}/lines/{line}", budget_path(project))).await
    }

    // ========================================================================
    // Whole-budget actions
    // ========================================================================

    /// Stores every line's planned total as its limit.
    pub async fn save_limit(&self, project: ProjectId) -> ClientResult<()> {
        self.post_empty(&format!("{}/save-limit", budget_path(project)))
            .await?;
        info!(project_id = %project, "Limits saved");
        Ok(())
    }

    /// Fills the budget with the standard category template.
    pub async fn budget_from_template(&self, project: ProjectId) -> ClientResult<()> {
        self.post_empty(&format!("{}/from-template", budget_path(project)))
            .await?;
        info!(project_id = %project, "Budget template loaded");
        Ok(())
    }

    /// Spreadsheet export of the budget.
    pub async fn export_budget(&self, project: ProjectId) -> ClientResult<Vec<u8>> {
        self.get_bytes(&format!("{}/export", budget_path(project))).await
    }
}
