//! Production reports of a project.

use std::sync::Arc;

use filmbudget_core::catalog::{Contract, Contractor};
use filmbudget_core::production::{EntryStatus, ProductionReport, ProductionService, ReportEntry};
use filmbudget_core::tax::{TaxScheme, TaxSpec};
use filmbudget_shared::types::{ContractId, ContractorId, EntryId, ProjectId, ReportId};
use futures::future::try_join_all;
use rust_decimal::Decimal;
use tracing::info;

use crate::api::ContractFilter;
use crate::error::ClientResult;
use crate::forms::{EntryForm, ReportForm};
use crate::http::ApiClient;
use crate::scope::ViewScope;

/// Locally computed figures of an entry being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryPreview {
    /// Hours above the base shift.
    pub overtime_hours: Decimal,
    /// `rate * quantity`.
    pub net: Decimal,
    /// Net plus tax under the entry's scheme.
    pub gross: Decimal,
}

/// Production report controller of one project.
#[derive(Debug)]
pub struct ProductionPage {
    client: Arc<ApiClient>,
    scope: ViewScope,
    project_id: ProjectId,
    reports: Vec<ProductionReport>,
    contracts: Vec<Contract>,
    contractors: Arc<Vec<Contractor>>,
    schemes: Arc<Vec<TaxScheme>>,
}

impl ProductionPage {
    /// Opens the page, loading reports and reference data concurrently.
    pub async fn open(client: Arc<ApiClient>, project_id: ProjectId) -> ClientResult<Self> {
        let scope = ViewScope::new();
        let (reports, contracts, contractors, schemes) = scope
            .run(async {
                tokio::try_join!(
                    client.reports(project_id),
                    client.contracts(ContractFilter::project(project_id)),
                    client.contractors(),
                    client.tax_schemes(),
                )
            })
            .await?;

        Ok(Self {
            client,
            scope,
            project_id,
            reports,
            contracts,
            contractors,
            schemes,
        })
    }

    /// Loaded reports.
    #[must_use]
    pub fn reports(&self) -> &[ProductionReport] {
        &self.reports
    }

    /// Contracts of the project.
    #[must_use]
    pub fn contracts(&self) -> &[Contract] {
        &self.contracts
    }

    /// Reloads the report list.
    pub async fn reload(&mut self) -> ClientResult<()> {
        self.reports = self.scope.run(self.client.reports(self.project_id)).await?;
        Ok(())
    }

    /// One report with its entries, with aggregates recomputed locally.
    pub async fn report(&self, id: ReportId) -> ClientResult<ProductionReport> {
        let mut report = self.scope.run(self.client.report(id)).await?;
        ProductionService::refresh_totals(&mut report);
        Ok(report)
    }

    /// Every loaded report with its entries, fetched concurrently.
    pub async fn reports_with_entries(&self) -> ClientResult<Vec<ProductionReport>> {
        let ids: Vec<ReportId> = self.reports.iter().map(|r| r.id).collect();
        self.scope
            .run(try_join_all(ids.into_iter().map(|id| self.report(id))))
            .await
    }

    // ========================================================================
    // Reports
    // ========================================================================

    /// Validates and creates a report.
    pub async fn create_report(&mut self, form: &ReportForm) -> ClientResult<ProductionReport> {
        form.check()?;
        let report = self
            .scope
            .run(self.client.create_report(self.project_id, form))
            .await?;
        info!(report_id = %report.id, day = report.shoot_day_number, "Report created");
        self.reload().await?;
        Ok(report)
    }

    /// Validates and updates a report.
    pub async fn update_report(&mut self, id: ReportId, form: &ReportForm) -> ClientResult<ProductionReport> {
        form.check()?;
        let report = self.scope.run(self.client.update_report(id, form)).await?;
        self.reload().await?;
        Ok(report)
    }

    /// Deletes a report.
    pub async fn delete_report(&mut self, id: ReportId) -> ClientResult<()> {
        self.scope.run(self.client.delete_report(id)).await?;
        self.reload().await
    }

    // ========================================================================
    // Entries
    // ========================================================================

    /// New entry form for a contractor, optionally under a contract.
    ///
    /// The tax scheme comes from the contract, else from the contractor.
    #[must_use]
    pub fn new_entry(&self, contractor_id: ContractorId, contract_id: Option<ContractId>) -> EntryForm {
        let contract = contract_id.and_then(|id| self.contracts.iter().find(|c| c.id == id));
        let contractor = self.contractors.iter().find(|c| c.id == contractor_id);

        EntryForm {
            contractor_id: Some(contractor_id),
            contract_id,
            budget_line_id: contract.and_then(|c| c.budget_line_ids.first().copied()),
            tax_scheme_id: ProductionService::default_tax_scheme(contract, contractor),
            ..EntryForm::default()
        }
    }

    /// Overtime and amounts of `form` as they will be stored.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Tax` if the scheme cannot be evaluated.
    pub fn preview(&self, form: &EntryForm) -> ClientResult<EntryPreview> {
        let spec = form
            .tax_scheme_id
            .and_then(|id| self.schemes.iter().find(|s| s.id == id))
            .map_or(TaxSpec::None, TaxScheme::spec);
        let amounts = ProductionService::entry_amounts(form.rate, form.quantity, &spec)?;

        Ok(EntryPreview {
            overtime_hours: ProductionService::overtime_hours(
                form.shift_start,
                form.shift_end,
                form.lunch_break_minutes,
                form.gap_minutes,
            ),
            net: amounts.net,
            gross: amounts.gross,
        })
    }

    /// Validates and adds an entry.
    pub async fn add_entry(&mut self, report: ReportId, form: &EntryForm) -> ClientResult<ReportEntry> {
        form.check()?;
        let entry = self.scope.run(self.client.create_entry(report, form)).await?;
        info!(entry_id = %entry.id, report_id = %report, "Entry added");
        self.reload().await?;
        Ok(entry)
    }

    /// Validates and updates an entry.
    pub async fn update_entry(&mut self, id: EntryId, form: &EntryForm) -> ClientResult<ReportEntry> {
        form.check()?;
        let entry = self.scope.run(self.client.update_entry(id, form)).await?;
        self.reload().await?;
        Ok(entry)
    }

    /// Moves an entry through the payment workflow.
    pub async fn set_entry_status(&mut self, id: EntryId, status: EntryStatus) -> ClientResult<ReportEntry> {
        let entry = self.scope.run(self.client.set_entry_status(id, status)).await?;
        self.reload().await?;
        Ok(entry)
    }

    /// Deletes an entry.
    pub async fn delete_entry(&mut self, id: EntryId) -> ClientResult<()> {
        self.scope.run(self.client.delete_entry(id)).await?;
        self.reload().await
    }
}
