//! Generic budget tree.
//!
//! Both the category → subcategory → line form and the older parent-pointer
//! record list are normalised into [`BudgetNode`] trees, which the flattener
//! walks.

use std::collections::HashMap;

use filmbudget_shared::types::LineId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::BudgetError;
use super::types::{BudgetLine, BudgetTree, Category, Subcategory};

/// Kind of a group node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    /// Top-level group.
    Category,
    /// Nested group.
    Subcategory,
}

/// Kind of any node, as shown in a flat row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Top-level group.
    Category,
    /// Nested group.
    Subcategory,
    /// Budget line.
    Line,
}

impl From<GroupKind> for NodeKind {
    fn from(kind: GroupKind) -> Self {
        match kind {
            GroupKind::Category => Self::Category,
            GroupKind::Subcategory => Self::Subcategory,
        }
    }
}

/// A group and its ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupNode {
    /// Group ID.
    pub id: Uuid,
    /// Category or subcategory.
    pub kind: GroupKind,
    /// Display name.
    pub name: String,
    /// Ordered children.
    pub children: Vec<BudgetNode>,
}

/// A node of the budget tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetNode {
    /// Category or subcategory.
    Group(GroupNode),
    /// Budget line.
    Line(Box<BudgetLine>),
}

impl BudgetNode {
    /// Raw node ID.
    #[must_use]
    pub fn id(&self) -> Uuid {
        match self {
            Self::Group(group) => group.id,
            Self::Line(line) => line.id.into_inner(),
        }
    }

    /// Node kind.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Group(group) => group.kind.into(),
            Self::Line(_) => NodeKind::Line,
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Group(group) => &group.name,
            Self::Line(line) => &line.name,
        }
    }

    /// Ordered children; empty for lines.
    #[must_use]
    pub fn children(&self) -> &[BudgetNode] {
        match self {
            Self::Group(group) => &group.children,
            Self::Line(_) => &[],
        }
    }

    /// The line, for line nodes.
    #[must_use]
    pub fn as_line(&self) -> Option<&BudgetLine> {
        match self {
            Self::Group(_) => None,
            Self::Line(line) => Some(line),
        }
    }
}

impl BudgetTree {
    /// Builds the generic tree, ordering every level by `order_index`.
    #[must_use]
    pub fn nodes(&self) -> Vec<BudgetNode> {
        let mut categories: Vec<&Category> = self.categories.iter().collect();
        categories.sort_by_key(|c| c.order_index);
        categories.into_iter().map(category_node).collect()
    }
}

fn category_node(category: &Category) -> BudgetNode {
    let mut subcategories: Vec<&Subcategory> = category.subcategories.iter().collect();
    subcategories.sort_by_key(|s| s.order_index);

    BudgetNode::Group(GroupNode {
        id: category.id.into_inner(),
        kind: GroupKind::Category,
        name: category.name.clone(),
        children: subcategories.into_iter().map(subcategory_node).collect(),
    })
}

fn subcategory_node(subcategory: &Subcategory) -> BudgetNode {
    let mut lines: Vec<&BudgetLine> = subcategory.lines.iter().collect();
    lines.sort_by_key(|l| l.order_index);

    BudgetNode::Group(GroupNode {
        id: subcategory.id.into_inner(),
        kind: GroupKind::Subcategory,
        name: subcategory.name.clone(),
        children: lines
            .into_iter()
            .map(|l| BudgetNode::Line(Box::new(l.clone())))
            .collect(),
    })
}

/// Record type of the parent-pointer form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// Group of records.
    Group,
    /// Budget line.
    Item,
}

/// One record of the parent-pointer form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Record ID.
    pub id: Uuid,
    /// Parent group, `None` at the top level.
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    /// GROUP or ITEM.
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Display name.
    pub name: String,
    /// Position among siblings.
    #[serde(default)]
    pub sort_order: i32,
    /// Line data, required for ITEM records.
    #[serde(default)]
    pub line: Option<BudgetLine>,
}

impl NodeRecord {
    /// Builds ordered trees from a flat record list.
    ///
    /// Top-level groups become categories and deeper groups become
    /// subcategories.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::DuplicateNode` when two records share an ID.
    /// Returns `BudgetError::UnknownParent` when a parent is missing.
    /// Returns `BudgetError::ItemWithChildren` when a parent is an ITEM.
    /// Returns `BudgetError::MissingLineData` for an ITEM without a line.
    /// Returns `BudgetError::Cycle` when some records never reach a root.
    pub fn build_tree(records: Vec<Self>) -> Result<Vec<BudgetNode>, BudgetError> {
        let total = records.len();
        let mut by_id: HashMap<Uuid, Self> = HashMap::with_capacity(total);
        for record in records {
            let id = record.id;
            if by_id.insert(id, record).is_some() {
                return Err(BudgetError::DuplicateNode(id));
            }
        }

        let mut children: HashMap<Option<Uuid>, Vec<(i32, Uuid)>> = HashMap::new();
        for record in by_id.values() {
            if let Some(parent) = record.parent_id {
                match by_id.get(&parent) {
                    None => {
                        return Err(BudgetError::UnknownParent {
                            node: record.id,
                            parent,
                        });
                    }
                    Some(p) if p.record_type == RecordType::Item => {
                        return Err(BudgetError::ItemWithChildren(parent));
                    }
                    Some(_) => {}
                }
            }
            children
                .entry(record.parent_id)
                .or_default()
                .push((record.sort_order, record.id));
        }
        for siblings in children.values_mut() {
            siblings.sort();
        }

        let roots = children.get(&None).cloned().unwrap_or_default();
        let mut nodes = Vec::with_capacity(roots.len());
        for (_, id) in roots {
            nodes.push(build_node(id, 0, &mut by_id, &children)?);
        }

        match by_id.keys().min() {
            Some(&stray) => Err(BudgetError::Cycle(stray)),
            None => Ok(nodes),
        }
    }
}

fn build_node(
    id: Uuid,
    depth: usize,
    records: &mut HashMap<Uuid, NodeRecord>,
    children: &HashMap<Option<Uuid>, Vec<(i32, Uuid)>>,
) -> Result<BudgetNode, BudgetError> {
    let Some(record) = records.remove(&id) else {
        return Err(BudgetError::Cycle(id));
    };

    match record.record_type {
        RecordType::Item => {
            let mut line = record.line.ok_or(BudgetError::MissingLineData(id))?;
            line.id = LineId::from_uuid(id);
            line.order_index = record.sort_order;
            Ok(BudgetNode::Line(Box::new(line)))
        }
        RecordType::Group => {
            let kids = children
                .get(&Some(id))
                .map(Vec::as_slice)
                .unwrap_or_default();
            let mut built = Vec::with_capacity(kids.len());
            for &(_, child) in kids {
                built.push(build_node(child, depth + 1, records, children)?);
            }
            Ok(BudgetNode::Group(GroupNode {
                id,
                kind: if depth == 0 {
                    GroupKind::Category
                } else {
                    GroupKind::Subcategory
                },
                name: record.name,
                children: built,
            }))
        }
    }
}
