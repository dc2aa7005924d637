//! Film projects.

use chrono::NaiveDate;
use filmbudget_shared::types::{Currency, ProjectId};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProjectStatus {
    /// Project is being budgeted or shot.
    #[default]
    Active,
    /// Project is closed for editing.
    Archived,
}

/// A free-form project parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectParam {
    /// Parameter name.
    pub key: String,
    /// Parameter value.
    pub value: String,
}

/// A film project owning one budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project ID.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Start of production.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// End of production.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Budget currency.
    #[serde(default)]
    pub currency: Currency,
    /// Lifecycle state.
    #[serde(default)]
    pub status: ProjectStatus,
    /// Free-form parameters.
    #[serde(default)]
    pub params: Vec<ProjectParam>,
}

impl Project {
    /// Looks up a parameter value.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    /// Number of calendar days the project spans, both ends included.
    #[must_use]
    pub fn duration_days(&self) -> Option<i64> {
        let (start, end) = (self.start_date?, self.end_date?);
        (end >= start).then(|| (end - start).num_days() + 1)
    }
}
