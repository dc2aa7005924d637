//! Tax scheme directory.

use std::sync::Arc;

use filmbudget_core::tax::TaxScheme;
use filmbudget_shared::types::TaxSchemeId;
use tracing::info;

use crate::error::{ClientError, ClientResult};
use crate::forms::TaxSchemeForm;
use crate::http::ApiClient;
use crate::scope::ViewScope;

/// Tax scheme list controller.
#[derive(Debug)]
pub struct TaxSchemesPage {
    client: Arc<ApiClient>,
    scope: ViewScope,
    schemes: Arc<Vec<TaxScheme>>,
}

impl TaxSchemesPage {
    /// Opens the page and loads the list.
    pub async fn open(client: Arc<ApiClient>) -> ClientResult<Self> {
        let scope = ViewScope::new();
        let schemes = scope.run(client.tax_schemes()).await?;
        Ok(Self {
            client,
            scope,
            schemes,
        })
    }

    /// Loaded schemes.
    #[must_use]
    pub fn schemes(&self) -> &[TaxScheme] {
        &self.schemes
    }

    /// Reloads the list.
    pub async fn reload(&mut self) -> ClientResult<()> {
        self.schemes = self.scope.run(self.client.tax_schemes()).await?;
        Ok(())
    }

    /// Validates and creates a scheme.
    pub async fn create(&mut self, form: &TaxSchemeForm) -> ClientResult<TaxScheme> {
        form.check()?;
        let scheme = self.scope.run(self.client.create_tax_scheme(form)).await?;
        info!(scheme_id = %scheme.id, name = %scheme.name, "Tax scheme created");
        self.reload().await?;
        Ok(scheme)
    }

    /// Deletes a user scheme.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Invalid` for a system scheme without calling
    /// the backend.
    pub async fn delete(&mut self, id: TaxSchemeId) -> ClientResult<()> {
        if let Some(scheme) = self.schemes.iter().find(|s| s.id == id && s.is_system) {
            return Err(ClientError::Invalid(format!(
                "Системную схему «{}» удалить нельзя",
                scheme.name
            )));
        }
        self.scope.run(self.client.delete_tax_scheme(id)).await?;
        info!(scheme_id = %id, "Tax scheme deleted");
        self.reload().await
    }
}
