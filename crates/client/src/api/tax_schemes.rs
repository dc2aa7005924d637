//! Tax scheme endpoints.

use std::sync::Arc;

use filmbudget_core::tax::TaxScheme;
use filmbudget_shared::types::TaxSchemeId;

use crate::error::ClientResult;
use crate::forms::TaxSchemeForm;
use crate::http::ApiClient;

impl ApiClient {
    /// All tax schemes, served from the reference cache when fresh.
    pub async fn tax_schemes(&self) -> ClientResult<Arc<Vec<TaxScheme>>> {
        self.cache().tax_schemes(|| self.get("/tax-schemes")).await
    }

    /// Creates a tax scheme.
    pub async fn create_tax_scheme(&self, form: &TaxSchemeForm) -> ClientResult<TaxScheme> {
        let created = self.post("/tax-schemes", form).await?;
        self.cache().invalidate_tax_schemes().await;
        Ok(created)
    }

    /// Deletes a tax scheme.
    pub async fn delete_tax_scheme(&self, id: TaxSchemeId) -> ClientResult<()> {
        self.delete(&format!("/tax-schemes/{id}")).await?;
        self.cache().invalidate_tax_schemes().await;
        Ok(())
    }
}
