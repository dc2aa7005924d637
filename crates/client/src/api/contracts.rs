//! Contract endpoints.

use filmbudget_core::catalog::Contract;
use filmbudget_shared::types::{ContractId, ContractorId, ProjectId};

use crate::error::ClientResult;
use crate::forms::ContractForm;
use crate::http::ApiClient;

/// Optional filters of the contract list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContractFilter {
    /// Only contracts of this project.
    pub project_id: Option<ProjectId>,
    /// Only contracts with this contractor.
    pub contractor_id: Option<ContractorId>,
}

impl ContractFilter {
    /// Contracts of one project.
    #[must_use]
    pub fn project(project_id: ProjectId) -> Self {
        Self {
            project_id: Some(project_id),
            contractor_id: None,
        }
    }

    fn query(self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(id) = self.project_id {
            query.push(("project_id", id.to_string()));
        }
        if let Some(id) = self.contractor_id {
            query.push(("contractor_id", id.to_string()));
        }
        query
    }
}

impl ApiClient {
    /// Contracts matching `filter`.
    pub async fn contracts(&self, filter: ContractFilter) -> ClientResult<Vec<Contract>> {
        self.get_query("/contracts", &filter.query()).await
    }

    /// One contract.
    pub async fn contract(&self, id: ContractId) -> ClientResult<Contract> {
        self.get(&format!("/contracts/{id}")).await
    }

    /// Creates a contract.
    pub async fn create_contract(&self, form: &ContractForm) -> ClientResult<Contract> {
        self.post("/contracts", form).await
    }

    /// Updates a contract.
    pub async fn update_contract(&self, id: ContractId, form: &ContractForm) -> ClientResult<Contract> {
        self.patch(&format!("/contracts/{id}"), form).await
    }

    /// Deletes a contract.
    pub async fn delete_contract(&self, id: ContractId) -> ClientResult<()> {
        self.delete(&format!("/contracts/{id}")).await
    }
}
