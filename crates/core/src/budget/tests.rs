//! Property-based tests for budget module.

use std::collections::{HashMap, HashSet};

use filmbudget_shared::types::{CategoryId, LineId, SubcategoryId};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::flatten::{CollapseState, flatten};
use super::tree::NodeKind;
use super::types::{BudgetLine, BudgetTree, Category, Subcategory};
use crate::tax::FixedTaxType;

type Shape = Vec<Vec<Vec<(i64, i64)>>>;

fn shape_strategy() -> impl Strategy<Value = Shape> {
    prop::collection::vec(
        prop::collection::vec(prop::collection::vec((0i64..100_000, 0i64..100), 0..5), 0..4),
        0..4,
    )
}

fn line(name: &str, rate: Decimal, qty: Decimal) -> BudgetLine {
    let mut line = BudgetLine::new(LineId::new(), name);
    line.rate = rate;
    line.qty_plan = qty;
    line.qty_fact = qty;
    line.tax_type = Some(FixedTaxType::Individual);
    line.tax_rate_1 = dec!(13);
    line.tax_rate_2 = dec!(30);
    line
}

fn build_tree(shape: &Shape) -> BudgetTree {
    let categories = shape
        .iter()
        .zip(0..)
        .map(|(subs, ci)| Category {
            id: CategoryId::new(),
            name: format!("Category {ci}"),
            order_index: ci,
            subcategories: subs
                .iter()
                .zip(0..)
                .map(|(lines, si)| Subcategory {
                    id: SubcategoryId::new(),
                    category_id: None,
                    name: format!("Subcategory {si}"),
                    order_index: si,
                    lines: lines
                        .iter()
                        .zip(0..)
                        .map(|(&(rate, qty), li)| {
                            let mut l = line("Line", Decimal::from(rate), Decimal::from(qty));
                            l.order_index = li;
                            l.limit_amount = Some(Decimal::from(rate));
                            l
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();
    BudgetTree { categories }
}

fn node_count(shape: &Shape) -> usize {
    shape
        .iter()
        .map(|subs| 1 + subs.iter().map(|lines| 1 + lines.len()).sum::<usize>())
        .sum()
}

proptest! {
    /// Every node appears exactly once and every parent precedes its children.
    #[test]
    fn test_flatten_is_preorder(shape in shape_strategy()) {
        let tree = build_tree(&shape);
        let rows = flatten(&tree.nodes(), &[], &CollapseState::default());

        prop_assert_eq!(rows.len(), node_count(&shape));

        let mut seen = HashSet::new();
        for row in &rows {
            if let Some(parent) = row.parent_id {
                prop_assert!(seen.contains(&parent));
            } else {
                prop_assert_eq!(row.level, 0);
            }
            prop_assert!(seen.insert(row.id));
        }
    }

    /// Group totals equal the sum of the lines below them.
    #[test]
    fn test_group_totals_sum_descendant_lines(shape in shape_strategy()) {
        let tree = build_tree(&shape);
        let rows = flatten(&tree.nodes(), &[], &CollapseState::default());

        let by_id: HashMap<Uuid, usize> = rows.iter().enumerate().map(|(i, r)| (r.id, i)).collect();
        let mut expected: HashMap<Uuid, Decimal> = HashMap::new();
        for row in rows.iter().filter(|r| r.kind == NodeKind::Line) {
            let mut parent = row.parent_id;
            while let Some(p) = parent {
                *expected.entry(p).or_default() += row.totals.plan_total;
                parent = rows[by_id[&p]].parent_id;
            }
        }

        for row in rows.iter().filter(|r| r.is_group()) {
            prop_assert_eq!(row.totals.plan_total, expected.get(&row.id).copied().unwrap_or_default());
        }
    }

    /// Collapsing a category removes exactly its descendants and keeps its totals.
    #[test]
    fn test_collapse_prunes_descendants_only(shape in shape_strategy(), pick in any::<prop::sample::Index>()) {
        let tree = build_tree(&shape);
        let nodes = tree.nodes();
        prop_assume!(!nodes.is_empty());

        let target = &nodes[pick.index(nodes.len())];
        let full = flatten(&nodes, &[], &CollapseState::default());

        let mut state = CollapseState::default();
        state.toggle(target.id());
        let collapsed = flatten(&nodes, &[], &state);

        let descendants: usize = target
            .children()
            .iter()
            .map(|sub| 1 + sub.children().len())
            .sum();
        prop_assert_eq!(collapsed.len(), full.len() - descendants);

        let before = full.iter().find(|r| r.id == target.id()).unwrap();
        let after = collapsed.iter().find(|r| r.id == target.id()).unwrap();
        prop_assert_eq!(before.totals, after.totals);
        prop_assert!(!after.expanded);
        prop_assert!(collapsed.iter().all(|r| r.parent_id != Some(target.id())));
    }
}

mod unit_tests {
    use super::*;
    use crate::budget::error::BudgetError;
    use crate::budget::service::BudgetService;
    use crate::budget::tree::{BudgetNode, GroupKind, NodeRecord, RecordType};
    use crate::budget::types::UnitType;
    use crate::budget::variance::{LimitSnapshot, format_limit_pct, limit_delta};
    use crate::tax::TaxSpec;
    use rstest::rstest;
    use std::str::FromStr;

    fn sample_tree() -> BudgetTree {
        let mut camera = line("Оператор", dec!(1000), dec!(10));
        camera.order_index = 1;
        camera.limit_amount = Some(dec!(14000));
        let mut sound = line("Звукорежиссёр", dec!(2000), dec!(5));
        sound.order_index = 0;
        sound.tax_type = Some(FixedTaxType::SelfEmployed);
        sound.tax_rate_1 = dec!(6);
        sound.tax_rate_2 = Decimal::ZERO;

        BudgetTree {
            categories: vec![Category {
                id: CategoryId::new(),
                name: "Съёмочная группа".into(),
                order_index: 0,
                subcategories: vec![Subcategory {
                    id: SubcategoryId::new(),
                    category_id: None,
                    name: "Камера и звук".into(),
                    order_index: 0,
                    lines: vec![camera, sound],
                }],
            }],
        }
    }

    #[test]
    fn test_flatten_orders_and_levels() {
        let tree = sample_tree();
        let rows = flatten(&tree.nodes(), &[], &CollapseState::default());

        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            ["Съёмочная группа", "Камера и звук", "Звукорежиссёр", "Оператор"]
        );
        let levels: Vec<usize> = rows.iter().map(|r| r.level).collect();
        assert_eq!(levels, [0, 1, 2, 2]);
        assert!(rows[0].has_children);
        assert!(!rows[3].has_children);
        assert_eq!(rows[2].tax_label, "СЗ");
    }

    #[test]
    fn test_flatten_aggregates_totals() {
        let tree = sample_tree();
        let rows = flatten(&tree.nodes(), &[], &CollapseState::default());

        // 2000 net at 6% withheld: 127 tax per unit, 5 units
        assert_eq!(rows[2].totals.plan_total, dec!(10635));
        // 1000 net at 13% / 30%: 1493 per unit, 10 units
        assert_eq!(rows[3].totals.plan_total, dec!(14930));
        assert_eq!(rows[0].totals.plan_total, dec!(25565));
        assert_eq!(rows[0].totals.plan_net, dec!(20000));
        assert_eq!(rows[0].totals.limit, dec!(14000));
        assert_eq!(rows[3].totals.plan_pct(), "+6.6%");
        assert_eq!(rows[2].totals.plan_pct(), "");
    }

    #[test]
    fn test_collapse_all_and_expand_all() {
        let tree = sample_tree();
        let nodes = tree.nodes();
        let mut state = CollapseState::default();

        state.collapse_all(&nodes);
        let rows = flatten(&nodes, &[], &state);
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].expanded);

        state.expand_all();
        let rows = flatten(&nodes, &[], &state);
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn test_toggle_flips_state() {
        let mut state = CollapseState::default();
        let id = Uuid::new_v4();

        assert!(state.toggle(id));
        assert!(state.is_collapsed(id));
        assert!(!state.toggle(id));
        assert!(!state.is_collapsed(id));
    }

    #[rstest]
    #[case(dec!(1100), Some(dec!(1000)), "+10.0%")]
    #[case(dec!(1000), Some(dec!(1000)), "+0.0%")]
    #[case(dec!(945), Some(dec!(1000)), "-5.5%")]
    #[case(dec!(500), Some(dec!(0)), "")]
    #[case(dec!(500), None, "")]
    fn test_format_limit_pct(
        #[case] value: Decimal,
        #[case] limit: Option<Decimal>,
        #[case] expected: &str,
    ) {
        assert_eq!(format_limit_pct(value, limit), expected);
    }

    #[test]
    fn test_limit_delta_rounds_to_one_decimal() {
        assert_eq!(limit_delta(dec!(1), Some(dec!(3))), Some(dec!(-66.7)));
    }

    #[test]
    fn test_overtime_added_for_shift_units() {
        let mut l = line("Гаффер", dec!(1000), dec!(10));
        l.tax_type = Some(FixedTaxType::NoTax);
        l.ot_rate = dec!(200);
        l.ot_hours_plan = dec!(2);
        l.ot_shifts_plan = dec!(3);

        let totals = BudgetService::line_totals(&l, &l.tax_spec(&[])).unwrap();

        assert_eq!(totals.plan_gross, dec!(10000));
        assert_eq!(totals.plan_ot_gross, dec!(1200));
        assert_eq!(totals.plan_total, dec!(11200));
        assert_eq!(totals.fact_ot_gross, Decimal::ZERO);
    }

    #[test]
    fn test_overtime_taxed_with_line_spec() {
        let mut l = line("Гаффер", dec!(1000), dec!(60));
        l.tax_type = Some(FixedTaxType::SelfEmployed);
        l.tax_rate_1 = dec!(6);
        l.unit = UnitType::Day;
        l.ot_rate = dec!(100);
        l.ot_hours_plan = dec!(1);
        l.ot_shifts_plan = dec!(2);

        let totals = BudgetService::line_totals(&l, &l.tax_spec(&[])).unwrap();

        assert_eq!(totals.plan_gross, dec!(63780));
        // 100 net at 6%: 6 tax per hour
        assert_eq!(totals.plan_ot_gross, dec!(212));
        assert_eq!(totals.plan_total, dec!(63992));
    }

    #[test]
    fn test_overtime_ignored_for_other_units() {
        let mut l = line("Аренда", dec!(50000), dec!(1));
        l.unit = UnitType::Month;
        l.ot_rate = dec!(200);
        l.ot_hours_plan = dec!(2);
        l.ot_shifts_plan = dec!(3);

        let totals = BudgetService::line_totals(&l, &TaxSpec::None).unwrap();

        assert_eq!(totals.plan_ot_gross, Decimal::ZERO);
        assert_eq!(totals.plan_total, dec!(50000));
    }

    #[test]
    fn test_invalid_tax_is_reported_with_line() {
        let mut l = line("X", dec!(1000), dec!(1));
        l.tax_rate_1 = dec!(100);
        let id = l.id;

        let err = BudgetService::totals_for(&l, &[]).unwrap_err();

        assert!(matches!(err, BudgetError::InvalidTax { line, .. } if line == id));
    }

    #[test]
    fn test_flatten_contains_invalid_line() {
        let mut tree = sample_tree();
        let broken = &mut tree.categories[0].subcategories[0].lines[1];
        broken.tax_type = Some(FixedTaxType::Vat);
        broken.tax_rate_1 = dec!(120);
        let broken_id = broken.id;

        let rows = flatten(&tree.nodes(), &[], &CollapseState::default());

        assert_eq!(rows.len(), 4);
        let bad = rows.iter().find(|r| r.id == broken_id.into_inner()).unwrap();
        assert!(matches!(bad.error, Some(BudgetError::InvalidTax { line, .. }) if line == broken_id));
        assert_eq!(bad.totals.plan_total, Decimal::ZERO);
        assert_eq!(bad.invalid_lines, 1);

        let good = rows.iter().find(|r| r.line.is_some() && r.id != broken_id.into_inner()).unwrap();
        assert!(good.error.is_none());
        assert!(!good.is_incomplete());
        assert_eq!(rows[0].totals.plan_total, good.totals.plan_total);
        assert!(rows[0].is_incomplete());
        assert!(rows[1].is_incomplete());
        assert!(rows[0].error.is_none());
    }

    #[test]
    fn test_limit_snapshot_uses_plan_totals() {
        let tree = sample_tree();

        let snapshot = LimitSnapshot::capture(&tree, &[]).unwrap();

        assert_eq!(snapshot.entries.len(), 2);
        assert_eq!(snapshot.total(), dec!(25565));
        assert_eq!(snapshot.changed(), 2);
    }

    #[rstest]
    #[case("Смена", UnitType::Shift)]
    #[case("день", UnitType::Day)]
    #[case("Номер/ночь", UnitType::RoomNight)]
    fn test_unit_type_from_str(#[case] input: &str, #[case] expected: UnitType) {
        assert_eq!(UnitType::from_str(input).unwrap(), expected);
    }

    fn record(id: Uuid, parent: Option<Uuid>, record_type: RecordType, sort_order: i32) -> NodeRecord {
        NodeRecord {
            id,
            parent_id: parent,
            record_type,
            name: format!("node {sort_order}"),
            sort_order,
            line: (record_type == RecordType::Item).then(|| line("item", dec!(100), dec!(1))),
        }
    }

    #[test]
    fn test_records_build_ordered_tree() {
        let root = Uuid::new_v4();
        let group = Uuid::new_v4();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let records = vec![
            record(second, Some(group), RecordType::Item, 2),
            record(group, Some(root), RecordType::Group, 0),
            record(first, Some(group), RecordType::Item, 1),
            record(root, None, RecordType::Group, 0),
        ];

        let nodes = NodeRecord::build_tree(records).unwrap();
        let rows = flatten(&nodes, &[], &CollapseState::default());

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, [root, group, first, second]);
        assert!(matches!(&nodes[0], BudgetNode::Group(g) if g.kind == GroupKind::Category));
        assert_eq!(rows[1].kind, NodeKind::Subcategory);
        assert_eq!(rows[3].totals.plan_total, dec!(148));
    }

    #[test]
    fn test_records_reject_unknown_parent() {
        let orphan = Uuid::new_v4();
        let missing = Uuid::new_v4();

        let err = NodeRecord::build_tree(vec![record(orphan, Some(missing), RecordType::Group, 0)])
            .unwrap_err();

        assert_eq!(
            err,
            BudgetError::UnknownParent {
                node: orphan,
                parent: missing
            }
        );
    }

    #[test]
    fn test_records_reject_item_parent() {
        let item = Uuid::new_v4();
        let child = Uuid::new_v4();

        let err = NodeRecord::build_tree(vec![
            record(item, None, RecordType::Item, 0),
            record(child, Some(item), RecordType::Item, 0),
        ])
        .unwrap_err();

        assert_eq!(err, BudgetError::ItemWithChildren(item));
    }

    #[test]
    fn test_records_reject_cycle() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let err = NodeRecord::build_tree(vec![
            record(a, Some(b), RecordType::Group, 0),
            record(b, Some(a), RecordType::Group, 0),
        ])
        .unwrap_err();

        assert!(matches!(err, BudgetError::Cycle(_)));
    }

    #[test]
    fn test_records_require_line_data() {
        let id = Uuid::new_v4();
        let mut item = record(id, None, RecordType::Item, 0);
        item.line = None;

        let err = NodeRecord::build_tree(vec![item]).unwrap_err();

        assert_eq!(err, BudgetError::MissingLineData(id));
    }
}
