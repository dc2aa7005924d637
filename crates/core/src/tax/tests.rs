//! Property-based tests for tax module.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::engine::TaxEngine;
use super::types::{FixedTaxType, Recipient, TaxComponent, TaxKind, TaxSpec};

fn internal(rate: Decimal) -> TaxComponent {
    TaxComponent::new("internal", rate, TaxKind::Internal, Recipient::Budget).unwrap()
}

fn external(rate: Decimal) -> TaxComponent {
    TaxComponent::new("external", rate, TaxKind::External, Recipient::Budget)
        .unwrap()
        .with_sort_order(1)
}

fn fixed(tax_type: FixedTaxType, rate_1: Decimal, rate_2: Decimal) -> TaxSpec {
    TaxSpec::FixedType {
        tax_type,
        rate_1,
        rate_2,
    }
}

proptest! {
    /// Without tax the gross equals the net and no tax is charged.
    #[test]
    fn test_no_tax_passes_net_through(rate in 0i64..10_000_000, qty in 0i64..1_000) {
        let rate = Decimal::from(rate);
        let qty = Decimal::from(qty);

        let line = TaxEngine::line(rate, qty, &TaxSpec::None).unwrap();

        prop_assert_eq!(line.gross, rate * qty);
        prop_assert_eq!(line.net, rate * qty);
        prop_assert_eq!(line.total_tax(), Decimal::ZERO);
    }

    /// A single INTERNAL component grosses the base up and truncates.
    #[test]
    fn test_internal_component_grosses_up(rate in 0i64..10_000_000, percent in 0i64..100) {
        let rate = Decimal::from(rate);
        let x = Decimal::new(percent, 2);

        let unit = TaxEngine::apply(rate, &[internal(x)]);

        let expected = if x.is_zero() { Decimal::ZERO } else { (rate * x / (Decimal::ONE - x)).trunc() };
        prop_assert_eq!(unit.tax_1, expected);
        prop_assert_eq!(unit.gross, rate + unit.tax_1);
    }

    /// A single EXTERNAL component charges the rate on the base and truncates.
    #[test]
    fn test_external_component_charges_on_top(rate in 0i64..10_000_000, percent in 0i64..=100) {
        let rate = Decimal::from(rate);
        let x = Decimal::new(percent, 2);

        let unit = TaxEngine::apply(rate, &[external(x)]);

        prop_assert_eq!(unit.tax_1, (rate * x).trunc());
        prop_assert_eq!(unit.gross, rate + unit.tax_1);
    }

    /// Sole trader plus VAT applies VAT to the tax-inclusive base.
    #[test]
    fn test_sole_trader_vat_compounds(
        rate in 0i64..10_000_000,
        r1 in 0i64..100,
        r2 in 0i64..=100,
    ) {
        let rate = Decimal::from(rate);
        let p1 = Decimal::from(r1);
        let p2 = Decimal::from(r2);

        let unit = TaxEngine::per_unit(rate, &fixed(FixedTaxType::SoleTraderVat, p1, p2)).unwrap();

        let f1 = p1 / dec!(100);
        let f2 = p2 / dec!(100);
        let ip = if f1.is_zero() { Decimal::ZERO } else { (rate * f1 / (Decimal::ONE - f1)).trunc() };
        let vat = ((rate + ip) * f2).trunc();
        prop_assert_eq!(unit.tax_1, ip);
        prop_assert_eq!(unit.tax_2, vat);
        prop_assert_eq!(unit.gross, rate + ip + vat);
    }

    /// Gross is always net plus every component, and recipients partition the tax.
    #[test]
    fn test_gross_is_net_plus_components(
        rate in 0i64..10_000_000,
        r1 in 0i64..100,
        r2 in 0i64..=100,
        qty in 0i64..500,
    ) {
        let rate = Decimal::from(rate);
        let qty = Decimal::from(qty);
        let spec = fixed(FixedTaxType::Individual, Decimal::from(r1), Decimal::from(r2));

        let unit = TaxEngine::per_unit(rate, &spec).unwrap();
        let line = unit.times(qty);

        let component_sum: Decimal = unit.components.iter().map(|c| c.amount).sum();
        prop_assert_eq!(unit.gross, unit.net + component_sum);
        prop_assert_eq!(line.budget_tax + line.contractor_tax, line.total_tax());
        prop_assert_eq!(line.gross, unit.gross * qty);
    }

    /// A fixed type and the equivalent component list evaluate identically.
    #[test]
    fn test_fixed_type_matches_component_list(
        rate in 0i64..10_000_000,
        r1 in 0i64..100,
        r2 in 0i64..=100,
    ) {
        let rate = Decimal::from(rate);
        for tax_type in FixedTaxType::ALL {
            let spec = fixed(tax_type, Decimal::from(r1), Decimal::from(r2));
            let list = TaxSpec::ComponentList {
                components: tax_type.components(Decimal::from(r1), Decimal::from(r2)).unwrap(),
            };

            prop_assert_eq!(
                TaxEngine::per_unit(rate, &spec).unwrap(),
                TaxEngine::per_unit(rate, &list).unwrap()
            );
        }
    }
}

mod unit_tests {
    use super::*;
    use crate::tax::error::TaxError;
    use rstest::rstest;
    use std::str::FromStr;

    #[test]
    fn test_vat_line() {
        let spec = fixed(FixedTaxType::Vat, dec!(20), Decimal::ZERO);

        let unit = TaxEngine::per_unit(dec!(1000), &spec).unwrap();
        let line = unit.times(dec!(2));

        assert_eq!(unit.tax_1, dec!(200));
        assert_eq!(unit.gross, dec!(1200));
        assert_eq!(line.gross, dec!(2400));
    }

    #[test]
    fn test_self_employed_sixty_shifts() {
        let spec = fixed(FixedTaxType::SelfEmployed, dec!(6), Decimal::ZERO);

        let unit = TaxEngine::per_unit(dec!(1000), &spec).unwrap();
        let line = unit.times(dec!(60));

        assert_eq!(unit.tax_1, dec!(63));
        assert_eq!(unit.gross, dec!(1063));
        assert_eq!(line.gross, dec!(63780));
        assert_eq!(line.contractor_tax, dec!(3780));
        assert_eq!(line.budget_tax, Decimal::ZERO);
    }

    #[test]
    fn test_individual_income_tax_and_insurance() {
        let spec = fixed(FixedTaxType::Individual, dec!(13), dec!(30));

        let unit = TaxEngine::per_unit(dec!(1000), &spec).unwrap();
        let line = unit.times(dec!(10));

        assert_eq!(unit.tax_1, dec!(149));
        assert_eq!(unit.tax_2, dec!(344));
        assert_eq!(unit.gross, dec!(1493));
        assert_eq!(line.gross, dec!(14930));
        assert_eq!(unit.components[1].base, dec!(1149));
    }

    #[test]
    fn test_component_list_applies_in_sort_order() {
        let vat = TaxComponent::new("НДС", dec!(0.2), TaxKind::External, Recipient::Contractor)
            .unwrap()
            .with_sort_order(1);
        let usn = TaxComponent::new("УСН", dec!(0.06), TaxKind::Internal, Recipient::Contractor)
            .unwrap()
            .with_sort_order(0);
        let spec = TaxSpec::ComponentList {
            components: vec![vat, usn],
        };

        let unit = TaxEngine::per_unit(dec!(1000), &spec).unwrap();

        assert_eq!(unit.components[0].name, "УСН");
        assert_eq!(unit.tax_1, dec!(63));
        // (1000 + 63) * 0.2 = 212.6
        assert_eq!(unit.tax_2, dec!(212));
        assert_eq!(unit.gross, dec!(1275));
    }

    #[test]
    fn test_zero_rate_produces_zero() {
        let spec = fixed(FixedTaxType::Individual, dec!(13), dec!(30));

        let unit = TaxEngine::per_unit(Decimal::ZERO, &spec).unwrap();

        assert_eq!(unit.gross, Decimal::ZERO);
        assert_eq!(unit.total_tax(), Decimal::ZERO);
    }

    #[test]
    fn test_no_tax_type_passes_through() {
        let spec = fixed(FixedTaxType::NoTax, dec!(50), dec!(50));

        let unit = TaxEngine::per_unit(dec!(1500), &spec).unwrap();

        assert_eq!(unit.gross, dec!(1500));
        assert!(unit.components.is_empty());
    }

    #[rstest]
    #[case(dec!(1), TaxKind::Internal, TaxError::InternalRateOutOfRange(dec!(1)))]
    #[case(dec!(1.5), TaxKind::Internal, TaxError::InternalRateOutOfRange(dec!(1.5)))]
    #[case(dec!(1.01), TaxKind::External, TaxError::ExternalRateOutOfRange(dec!(1.01)))]
    #[case(dec!(-0.1), TaxKind::External, TaxError::NegativeRate(dec!(-0.1)))]
    fn test_component_rejects_impossible_rates(
        #[case] rate: Decimal,
        #[case] kind: TaxKind,
        #[case] expected: TaxError,
    ) {
        let err = TaxComponent::new("x", rate, kind, Recipient::Budget).unwrap_err();
        assert_eq!(err, expected);
    }

    #[test]
    fn test_external_rate_of_one_is_allowed() {
        let component = TaxComponent::new("x", dec!(1), TaxKind::External, Recipient::Budget);
        assert!(component.is_ok());
    }

    #[rstest]
    #[case(FixedTaxType::SelfEmployed, dec!(100), Decimal::ZERO)]
    #[case(FixedTaxType::Vat, dec!(100.5), Decimal::ZERO)]
    #[case(FixedTaxType::Individual, dec!(13), dec!(-1))]
    fn test_fixed_type_rejects_bad_percentages(
        #[case] tax_type: FixedTaxType,
        #[case] rate_1: Decimal,
        #[case] rate_2: Decimal,
    ) {
        let result = TaxEngine::per_unit(dec!(1000), &fixed(tax_type, rate_1, rate_2));
        assert!(matches!(result, Err(TaxError::PercentOutOfRange(_))));
    }

    #[test]
    fn test_unused_slot_is_not_validated() {
        let result = TaxEngine::per_unit(dec!(1000), &fixed(FixedTaxType::Vat, dec!(20), dec!(500)));
        assert!(result.is_ok());
    }

    #[test]
    fn test_component_deserialization_validates_rate() {
        let ok: Result<TaxComponent, _> = serde_json::from_str(
            r#"{"name": "НДФЛ", "rate": 0.13, "type": "INTERNAL", "recipient": "BUDGET", "sort_order": 0}"#,
        );
        assert_eq!(ok.unwrap().rate(), dec!(0.13));

        let bad: Result<TaxComponent, _> =
            serde_json::from_str(r#"{"name": "X", "rate": 1.0, "type": "INTERNAL"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_spec_deserialization() {
        let spec: TaxSpec = serde_json::from_str(
            r#"{"variant": "fixed_type", "tax_type": "ИП+НДС", "rate_1": "6", "rate_2": "20"}"#,
        )
        .unwrap();

        assert_eq!(spec, fixed(FixedTaxType::SoleTraderVat, dec!(6), dec!(20)));
    }

    #[rstest]
    #[case("СЗ", FixedTaxType::SelfEmployed)]
    #[case("ип+ндс", FixedTaxType::SoleTraderVat)]
    #[case(" ФЛ ", FixedTaxType::Individual)]
    #[case("без налога", FixedTaxType::NoTax)]
    fn test_fixed_type_from_str(#[case] input: &str, #[case] expected: FixedTaxType) {
        assert_eq!(FixedTaxType::from_str(input).unwrap(), expected);
    }

    #[test]
    fn test_fixed_type_from_str_unknown() {
        assert!(matches!(
            FixedTaxType::from_str("VAT"),
            Err(TaxError::UnknownTaxType(_))
        ));
    }
}
