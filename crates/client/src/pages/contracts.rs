//! Contract list.

use std::sync::Arc;

use filmbudget_core::budget::BudgetTree;
use filmbudget_core::catalog::Contract;
use filmbudget_shared::types::{ContractId, LineId};
use tracing::info;

use crate::api::ContractFilter;
use crate::error::ClientResult;
use crate::forms::ContractForm;
use crate::http::ApiClient;
use crate::scope::ViewScope;

/// A budget line a contract can be linked to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineChoice {
    /// Line ID.
    pub id: LineId,
    /// "Category / Subcategory / Line".
    pub label: String,
}

impl LineChoice {
    /// Every line of `tree`, labelled with its path.
    #[must_use]
    pub fn from_tree(tree: &BudgetTree) -> Vec<Self> {
        let mut categories: Vec<_> = tree.categories.iter().collect();
        categories.sort_by_key(|c| c.order_index);

        let mut choices = Vec::new();
        for category in categories {
            let mut subcategories: Vec<_> = category.subcategories.iter().collect();
            subcategories.sort_by_key(|s| s.order_index);
            for subcategory in subcategories {
                let mut lines: Vec<_> = subcategory.lines.iter().collect();
                lines.sort_by_key(|l| l.order_index);
                choices.extend(lines.into_iter().map(|line| Self {
                    id: line.id,
                    label: format!("{} / {} / {}", category.name, subcategory.name, line.name),
                }));
            }
        }
        choices
    }
}

/// Contract list controller.
#[derive(Debug)]
pub struct ContractsPage {
    client: Arc<ApiClient>,
    scope: ViewScope,
    filter: ContractFilter,
    contracts: Vec<Contract>,
    line_choices: Vec<LineChoice>,
}

impl ContractsPage {
    /// Opens the page for `filter`.
    ///
    /// With a project in the filter, its budget lines are loaded alongside
    /// as link choices.
    pub async fn open(client: Arc<ApiClient>, filter: ContractFilter) -> ClientResult<Self> {
        let mut page = Self {
            client,
            scope: ViewScope::new(),
            filter,
            contracts: Vec::new(),
            line_choices: Vec::new(),
        };
        page.reload().await?;
        Ok(page)
    }

    /// Loaded contracts.
    #[must_use]
    pub fn contracts(&self) -> &[Contract] {
        &self.contracts
    }

    /// Budget lines a contract of this project can be linked to.
    #[must_use]
    pub fn line_choices(&self) -> &[LineChoice] {
        &self.line_choices
    }

    /// Reloads contracts and line choices.
    pub async fn reload(&mut self) -> ClientResult<()> {
        let client = &self.client;
        let filter = self.filter;
        let (contracts, tree) = self
            .scope
            .run(async {
                let tree = async {
                    match filter.project_id {
                        Some(project) => client.budget_tree(project).await.map(Some),
                        None => Ok(None),
                    }
                };
                tokio::try_join!(client.contracts(filter), tree)
            })
            .await?;

        self.contracts = contracts;
        self.line_choices = tree.as_ref().map(LineChoice::from_tree).unwrap_or_default();
        Ok(())
    }

    /// Validates and creates a contract.
    pub async fn create(&mut self, form: &ContractForm) -> ClientResult<Contract> {
        form.check()?;
        let contract = self.scope.run(self.client.create_contract(form)).await?;
        info!(contract_id = %contract.id, number = %contract.number, "Contract created");
        self.reload().await?;
        Ok(contract)
    }

    /// Validates and updates a contract.
    pub async fn update(&mut self, id: ContractId, form: &ContractForm) -> ClientResult<Contract> {
        form.check()?;
        let contract = self.scope.run(self.client.update_contract(id, form)).await?;
        self.reload().await?;
        Ok(contract)
    }

    /// Deletes a contract.
    pub async fn delete(&mut self, id: ContractId) -> ClientResult<()> {
        self.scope.run(self.client.delete_contract(id)).await?;
        info!(contract_id = %id, "Contract deleted");
        self.reload().await
    }
}
