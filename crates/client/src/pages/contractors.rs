//! Contractor directory.

use std::sync::Arc;

use filmbudget_core::catalog::Contractor;
use filmbudget_shared::types::ContractorId;
use tracing::info;

use crate::error::ClientResult;
use crate::forms::ContractorForm;
use crate::http::ApiClient;
use crate::scope::ViewScope;

/// Contractor list controller.
#[derive(Debug)]
pub struct ContractorsPage {
    client: Arc<ApiClient>,
    scope: ViewScope,
    contractors: Arc<Vec<Contractor>>,
}

impl ContractorsPage {
    /// Opens the page and loads the list.
    pub async fn open(client: Arc<ApiClient>) -> ClientResult<Self> {
        let scope = ViewScope::new();
        let contractors = scope.run(client.contractors()).await?;
        Ok(Self {
            client,
            scope,
            contractors,
        })
    }

    /// Loaded contractors.
    #[must_use]
    pub fn contractors(&self) -> &[Contractor] {
        &self.contractors
    }

    /// Contractors whose name contains `query`, case-insensitively.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Contractor> {
        let query = query.trim().to_lowercase();
        self.contractors
            .iter()
            .filter(|c| c.full_name.to_lowercase().contains(&query))
            .collect()
    }

    /// Reloads the list.
    pub async fn reload(&mut self) -> ClientResult<()> {
        self.contractors = self.scope.run(self.client.contractors()).await?;
        Ok(())
    }

    /// Validates and creates a contractor.
    pub async fn create(&mut self, form: &ContractorForm) -> ClientResult<Contractor> {
        form.check()?;
        let contractor = self.scope.run(self.client.create_contractor(form)).await?;
        info!(contractor_id = %contractor.id, "Contractor created");
        self.reload().await?;
        Ok(contractor)
    }

    /// Validates and updates a contractor.
    pub async fn update(&mut self, id: ContractorId, form: &ContractorForm) -> ClientResult<Contractor> {
        form.check()?;
        let contractor = self.scope.run(self.client.update_contractor(id, form)).await?;
        self.reload().await?;
        Ok(contractor)
    }
}
