//! Budget tree flattening for the grid.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::BudgetError;
use super::service::{BudgetService, LineTotals};
use super::tree::{BudgetNode, NodeKind};
use super::types::BudgetLine;
use super::variance::format_limit_pct;
use crate::tax::TaxScheme;

/// Aggregated figures of a row: its own line, or every line below a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowTotals {
    /// Planned net.
    pub plan_net: Decimal,
    /// Planned tax.
    pub plan_tax: Decimal,
    /// Planned gross including overtime.
    pub plan_total: Decimal,
    /// Actual gross including overtime.
    pub fact_total: Decimal,
    /// Sum of limits.
    pub limit: Decimal,
    /// Sum of payments.
    pub paid: Decimal,
}

impl RowTotals {
    fn from_line(line: &BudgetLine, totals: &LineTotals) -> Self {
        Self {
            plan_net: totals.plan_net,
            plan_tax: totals.plan_tax(),
            plan_total: totals.plan_total,
            fact_total: totals.fact_total,
            limit: line.limit_amount.unwrap_or_default(),
            paid: line.paid,
        }
    }

    fn add(&mut self, other: &Self) {
        self.plan_net += other.plan_net;
        self.plan_tax += other.plan_tax;
        self.plan_total += other.plan_total;
        self.fact_total += other.fact_total;
        self.limit += other.limit;
        self.paid += other.paid;
    }

    /// Planned total against the limit (`+10.0%`), empty without a limit.
    #[must_use]
    pub fn plan_pct(&self) -> String {
        format_limit_pct(self.plan_total, Some(self.limit))
    }

    /// Actual total against the limit, empty without a limit.
    #[must_use]
    pub fn fact_pct(&self) -> String {
        format_limit_pct(self.fact_total, Some(self.limit))
    }
}

/// One display row of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRow {
    /// Node ID.
    pub id: Uuid,
    /// Parent node ID.
    pub parent_id: Option<Uuid>,
    /// Depth, 0 for categories.
    pub level: usize,
    /// Row kind.
    pub kind: NodeKind,
    /// Whether the row's children are shown.
    pub expanded: bool,
    /// Whether the node has children at all.
    pub has_children: bool,
    /// Display name.
    pub name: String,
    /// Tax scheme or fixed type label; empty for groups.
    pub tax_label: String,
    /// The line itself, for line rows.
    pub line: Option<BudgetLine>,
    /// Aggregated figures.
    pub totals: RowTotals,
    /// Why the line could not be evaluated; its totals are then zero.
    #[serde(skip)]
    pub error: Option<BudgetError>,
    /// Lines at or below this row that could not be evaluated.
    pub invalid_lines: usize,
}

impl FlatRow {
    /// Whether this row is a category or subcategory.
    #[must_use]
    pub fn is_group(&self) -> bool {
        self.kind != NodeKind::Line
    }

    /// Whether the row's totals leave out lines that could not be evaluated.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        self.invalid_lines > 0
    }
}

/// Set of collapsed node IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapseState {
    collapsed: HashSet<Uuid>,
}

impl CollapseState {
    /// Whether `id` is collapsed.
    #[must_use]
    pub fn is_collapsed(&self, id: Uuid) -> bool {
        self.collapsed.contains(&id)
    }

    /// Flips the collapsed state of `id`, returning the new state.
    pub fn toggle(&mut self, id: Uuid) -> bool {
        if self.collapsed.remove(&id) {
            false
        } else {
            self.collapsed.insert(id);
            true
        }
    }

    /// Collapses every top-level node that has children.
    pub fn collapse_all(&mut self, nodes: &[BudgetNode]) {
        self.collapsed.extend(
            nodes
                .iter()
                .filter(|n| !n.children().is_empty())
                .map(BudgetNode::id),
        );
    }

    /// Expands everything.
    pub fn expand_all(&mut self) {
        self.collapsed.clear();
    }
}

/// Flattens `nodes` into pre-order display rows.
///
/// Collapsed nodes keep their own row and totals; only their descendants are
/// left out. Totals are aggregated over the full subtree either way.
///
/// A line whose tax configuration cannot be evaluated still gets its row,
/// with zero totals and the error attached. It is left out of its groups'
/// sums, which count it in `invalid_lines` instead.
#[must_use]
pub fn flatten(nodes: &[BudgetNode], schemes: &[TaxScheme], collapsed: &CollapseState) -> Vec<FlatRow> {
    let mut rows = Vec::new();
    let mut ctx = Walk {
        schemes,
        collapsed,
        rows: &mut rows,
    };
    for node in nodes {
        ctx.visit(node, None, 0, true);
    }
    rows
}

struct Walk<'a> {
    schemes: &'a [TaxScheme],
    collapsed: &'a CollapseState,
    rows: &'a mut Vec<FlatRow>,
}

#[derive(Default)]
struct Subtree {
    totals: RowTotals,
    invalid_lines: usize,
}

impl Walk<'_> {
    fn visit(&mut self, node: &BudgetNode, parent_id: Option<Uuid>, level: usize, visible: bool) -> Subtree {
        let id = node.id();
        let expanded = !self.collapsed.is_collapsed(id);

        let slot = visible.then(|| {
            self.rows.push(FlatRow {
                id,
                parent_id,
                level,
                kind: node.kind(),
                expanded,
                has_children: !node.children().is_empty(),
                name: node.name().to_string(),
                tax_label: node
                    .as_line()
                    .map(|l| l.tax_label(self.schemes))
                    .unwrap_or_default(),
                line: node.as_line().cloned(),
                totals: RowTotals::default(),
                error: None,
                invalid_lines: 0,
            });
            self.rows.len() - 1
        });

        let (subtree, error) = match node {
            BudgetNode::Line(line) => match BudgetService::totals_for(line, self.schemes) {
                Ok(line_totals) => (
                    Subtree {
                        totals: RowTotals::from_line(line, &line_totals),
                        invalid_lines: 0,
                    },
                    None,
                ),
                Err(e) => (
                    Subtree {
                        totals: RowTotals::default(),
                        invalid_lines: 1,
                    },
                    Some(e),
                ),
            },
            BudgetNode::Group(group) => {
                let mut sum = Subtree::default();
                for child in &group.children {
                    let child = self.visit(child, Some(id), level + 1, visible && expanded);
                    sum.totals.add(&child.totals);
                    sum.invalid_lines += child.invalid_lines;
                }
                (sum, None)
            }
        };

        if let Some(index) = slot {
            let row = &mut self.rows[index];
            row.totals = subtree.totals;
            row.invalid_lines = subtree.invalid_lines;
            row.error = error;
        }
        subtree
    }
}
