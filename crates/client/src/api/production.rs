//! Production report endpoints.

use filmbudget_core::production::{EntryStatus, ProductionReport, ReportEntry};
use filmbudget_shared::types::{EntryId, ProjectId, ReportId};
use serde::Serialize;

use crate::error::ClientResult;
use crate::forms::{EntryForm, ReportForm};
use crate::http::ApiClient;

#[derive(Serialize)]
struct StatusUpdate {
    status: EntryStatus,
}

impl ApiClient {
    // ========================================================================
    // Reports
    // ========================================================================

    /// Reports of a project.
    pub async fn reports(&self, project: ProjectId) -> ClientResult<Vec<ProductionReport>> {
        self.get(&format!("/production/projects/{project}/reports")).await
    }

    /// One report with its entries.
    pub async fn report(&self, id: ReportId) -> ClientResult<ProductionReport> {
        self.get(&format!("/production/reports/{id}")).await
    }

    /// Creates a report.
    pub async fn create_report(&self, project: ProjectId, form: &ReportForm) -> ClientResult<ProductionReport> {
        self.post(&format!("/production/projects/{project}/reports"), form)
            .await
    }

    /// Updates a report.
    pub async fn update_report(&self, id: ReportId, form: &ReportForm) -> ClientResult<ProductionReport> {
        self.patch(&format!("/production/reports/{id}"), form).await
    }

    /// Deletes a report with its entries.
    pub async fn delete_report(&self, id: ReportId) -> ClientResult<()> {
        self.delete(&format!("/production/reports/{id}")).await
    }

    // ========================================================================
    // Entries
    // ========================================================================

    /// Adds an entry to a report.
    pub async fn create_entry(&self, report: ReportId, form: &EntryForm) -> ClientResult<ReportEntry> {
        self.post(&format!("/production/reports/{report}/entries"), form)
            .await
    }

    /// Updates an entry.
    pub async fn update_entry(&self, id: EntryId, form: &EntryForm) -> ClientResult<ReportEntry> {
        self.patch(&format!("/production/entries/{id}"), form).await
    }

    /// Moves an entry through the payment workflow.
    pub async fn set_entry_status(&self, id: EntryId, status: EntryStatus) -> ClientResult<ReportEntry> {
        self.patch(&format!("/production/entries/{id}"), &StatusUpdate { status })
            .await
    }

    /// Deletes an entry.
    pub async fn delete_entry(&self, id: EntryId) -> ClientResult<()> {
        self.delete(&format!("/production/entries/{id}")).await
    }
}
