//! Contractor endpoints.

use std::sync::Arc;

use filmbudget_core::catalog::Contractor;
use filmbudget_shared::types::ContractorId;

use crate::error::ClientResult;
use crate::forms::ContractorForm;
use crate::http::ApiClient;

impl ApiClient {
    /// All contractors, served from the reference cache when fresh.
    pub async fn contractors(&self) -> ClientResult<Arc<Vec<Contractor>>> {
        self.cache()
            .contractors(|| self.get("/contractors"))
            .await
    }

    /// One contractor.
    pub async fn contractor(&self, id: ContractorId) -> ClientResult<Contractor> {
        self.get(&format!("/contractors/{id}")).await
    }

    /// Creates a contractor.
    pub async fn create_contractor(&self, form: &ContractorForm) -> ClientResult<Contractor> {
        let created = self.post("/contractors", form).await?;
        self.cache().invalidate_contractors().await;
        Ok(created)
    }

    /// Updates a contractor.
    pub async fn update_contractor(
        &self,
        id: ContractorId,
        form: &ContractorForm,
    ) -> ClientResult<Contractor> {
        let updated = self.patch(&format!("/contractors/{id}"), form).await?;
        self.cache().invalidate_contractors().await;
        Ok(updated)
    }
}
