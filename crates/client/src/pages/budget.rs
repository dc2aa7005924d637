//! Budget grid page.

use std::path::Path;
use std::sync::Arc;

use filmbudget_core::budget::{
    BudgetNode, BudgetTree, CollapseState, FlatRow, LimitSnapshot, flatten,
};
use filmbudget_core::catalog::{Contractor, Project};
use filmbudget_core::grid::{CellEdit, Column, EditContext, GridError, columns};
use filmbudget_core::tax::TaxScheme;
use filmbudget_shared::types::{CategoryId, LineId, ProjectId, SubcategoryId};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{ClientError, ClientResult};
use crate::forms::{CategoryForm, LineForm, SubcategoryForm};
use crate::http::ApiClient;
use crate::scope::ViewScope;

/// Budget grid controller of one project.
#[derive(Debug)]
pub struct BudgetPage {
    client: Arc<ApiClient>,
    scope: ViewScope,
    project: Project,
    tree: BudgetTree,
    nodes: Vec<BudgetNode>,
    schemes: Arc<Vec<TaxScheme>>,
    contractors: Arc<Vec<Contractor>>,
    collapsed: CollapseState,
    rows: Vec<FlatRow>,
    show_finance: bool,
}

impl BudgetPage {
    /// Opens the page, loading project, tree and reference data concurrently.
    pub async fn open(client: Arc<ApiClient>, project_id: ProjectId, show_finance: bool) -> ClientResult<Self> {
        let scope = ViewScope::new();
        let (project, tree, schemes, contractors) = scope
            .run(async {
                tokio::try_join!(
                    client.project(project_id),
                    client.budget_tree(project_id),
                    client.tax_schemes(),
                    client.contractors(),
                )
            })
            .await?;

        let mut page = Self {
            client,
            scope,
            project,
            tree,
            nodes: Vec::new(),
            schemes,
            contractors,
            collapsed: CollapseState::default(),
            rows: Vec::new(),
            show_finance,
        };
        page.rebuild();
        info!(project_id = %project_id, rows = page.rows.len(), "Budget opened");
        Ok(page)
    }

    // ========================================================================
    // State
    // ========================================================================

    /// Project shown.
    #[must_use]
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Loaded tree.
    #[must_use]
    pub fn tree(&self) -> &BudgetTree {
        &self.tree
    }

    /// Visible rows in display order.
    #[must_use]
    pub fn rows(&self) -> &[FlatRow] {
        &self.rows
    }

    /// Loaded tax schemes.
    #[must_use]
    pub fn schemes(&self) -> &[TaxScheme] {
        &self.schemes
    }

    /// Loaded contractors.
    #[must_use]
    pub fn contractors(&self) -> &[Contractor] {
        &self.contractors
    }

    /// Columns in display order.
    #[must_use]
    pub fn columns(&self) -> Vec<Column> {
        columns(self.show_finance)
    }

    /// Shows or hides the finance columns.
    pub fn set_show_finance(&mut self, show: bool) {
        self.show_finance = show;
    }

    /// Planned gross total of the whole budget.
    ///
    /// Lines that cannot be evaluated are left out; see [`Self::invalid_lines`].
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.rows
            .iter()
            .filter(|r| r.level == 0)
            .map(|r| r.totals.plan_total)
            .sum()
    }

    /// Rows of lines whose tax configuration cannot be evaluated.
    pub fn invalid_lines(&self) -> impl Iterator<Item = &FlatRow> {
        self.rows.iter().filter(|r| r.error.is_some())
    }

    /// Reloads tree and reference data, then rebuilds the rows.
    ///
    /// Nothing changes locally if any request fails.
    pub async fn reload(&mut self) -> ClientResult<()> {
        let client = &self.client;
        let project_id = self.project.id;
        let (tree, schemes, contractors) = self
            .scope
            .run(async {
                tokio::try_join!(
                    client.budget_tree(project_id),
                    client.tax_schemes(),
                    client.contractors(),
                )
            })
            .await?;

        self.tree = tree;
        self.schemes = schemes;
        self.contractors = contractors;
        self.rebuild();
        Ok(())
    }

    fn rebuild(&mut self) {
        let nodes = self.tree.nodes();
        self.rows = flatten(&nodes, &self.schemes, &self.collapsed);
        self.nodes = nodes;
        for row in self.invalid_lines() {
            if let Some(error) = &row.error {
                warn!(row_id = %row.id, error = %error, "Line left out of totals");
            }
        }
    }

    // ========================================================================
    // Expansion
    // ========================================================================

    /// Toggles a group; returns whether it is now collapsed.
    pub fn toggle(&mut self, id: Uuid) -> bool {
        let collapsed = self.collapsed.toggle(id);
        self.rebuild();
        collapsed
    }

    /// Collapses every category.
    pub fn collapse_all(&mut self) {
        self.collapsed.collapse_all(&self.nodes);
        self.rebuild();
    }

    /// Expands everything.
    pub fn expand_all(&mut self) {
        self.collapsed.expand_all();
        self.rebuild();
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Saves one cell edit as a partial line update, then reloads.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Grid` for edits rejected locally; backend
    /// failures leave the rows as they were.
    pub async fn apply_edit(&mut self, edit: &CellEdit) -> ClientResult<LineId> {
        let row = self
            .rows
            .iter()
            .find(|r| r.id == edit.row_id)
            .ok_or(GridError::RowNotFound(edit.row_id))?;
        let context = EditContext {
            schemes: &self.schemes,
            contractors: &self.contractors,
        };
        let (line_id, update) = context.translate(edit, row).inspect_err(|e| {
            warn!(row_id = %edit.row_id, column = ?edit.column, error = %e, "Edit rejected");
        })?;

        self.scope
            .run(self.client.update_line(self.project.id, line_id, &update))
            .await?;
        info!(line_id = %line_id, column = ?edit.column, "Line updated");
        self.reload().await?;
        Ok(line_id)
    }

    /// Adds a category.
    pub async fn add_category(&mut self, form: &CategoryForm) -> ClientResult<CategoryId> {
        form.check()?;
        let category = self
            .scope
            .run(self.client.create_category(self.project.id, form))
            .await?;
        self.reload().await?;
        Ok(category.id)
    }

    /// Renames a category.
    pub async fn rename_category(&mut self, id: CategoryId, form: &CategoryForm) -> ClientResult<()> {
        form.check()?;
        self.scope
            .run(self.client.update_category(self.project.id, id, form))
            .await?;
        self.reload().await
    }

    /// Deletes a category with everything below it.
    pub async fn delete_category(&mut self, id: CategoryId) -> ClientResult<()> {
        self.scope
            .run(self.client.delete_category(self.project.id, id))
            .await?;
        self.reload().await
    }

    /// Adds a subcategory.
    pub async fn add_subcategory(&mut self, form: &SubcategoryForm) -> ClientResult<SubcategoryId> {
        form.check()?;
        let subcategory = self
            .scope
            .run(self.client.create_subcategory(self.project.id, form))
            .await?;
        self.reload().await?;
        Ok(subcategory.id)
    }

    /// Deletes a subcategory with its lines.
    pub async fn delete_subcategory(&mut self, id: SubcategoryId) -> ClientResult<()> {
        self.scope
            .run(self.client.delete_subcategory(self.project.id, id))
            .await?;
        self.reload().await
    }

    /// Adds a line.
    pub async fn add_line(&mut self, form: &LineForm) -> ClientResult<LineId> {
        form.check()?;
        let line = self
            .scope
            .run(self.client.create_line(self.project.id, form))
            .await?;
        self.reload().await?;
        Ok(line.id)
    }

    /// Deletes a line.
    pub async fn delete_line(&mut self, id: LineId) -> ClientResult<()> {
        self.scope
            .run(self.client.delete_line(self.project.id, id))
            .await?;
        self.reload().await
    }

    // ========================================================================
    // Whole-budget actions
    // ========================================================================

    /// What "save limit" would store, computed locally.
    pub fn limit_preview(&self) -> ClientResult<LimitSnapshot> {
        Ok(LimitSnapshot::capture(&self.tree, &self.schemes)?)
    }

    /// Stores the current planned totals as limits.
    pub async fn save_limits(&mut self) -> ClientResult<()> {
        self.scope.run(self.client.save_limit(self.project.id)).await?;
        self.reload().await
    }

    /// Loads the standard category template into an empty budget.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Invalid` if the budget already has categories.
    pub async fn load_template(&mut self) -> ClientResult<()> {
        if !self.tree.categories.is_empty() {
            return Err(ClientError::Invalid(
                "Шаблон можно загрузить только в пустую смету".into(),
            ));
        }
        self.scope
            .run(self.client.budget_from_template(self.project.id))
            .await?;
        self.reload().await
    }

    /// Writes the spreadsheet export to `path`; returns its size.
    pub async fn export(&self, path: &Path) -> ClientResult<usize> {
        let bytes = self.scope.run(self.client.export_budget(self.project.id)).await?;
        tokio::fs::write(path, &bytes).await?;
        info!(path = %path.display(), bytes = bytes.len(), "Budget exported");
        Ok(bytes.len())
    }
}
