use super::*;
use chrono::NaiveDate;
use rstest::rstest;
use rust_decimal_macros::dec;
use serde_json::json;

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

#[test]
fn test_project_form_requires_name() {
    let form = ProjectForm {
        name: "   ".into(),
        ..ProjectForm::default()
    };

    assert!(matches!(form.check(), Err(ClientError::Validation(_))));
}

#[rstest]
#[case(date(2026, 6, 1), date(2026, 6, 30), true)]
#[case(date(2026, 6, 1), date(2026, 6, 1), true)]
#[case(date(2026, 6, 30), date(2026, 6, 1), false)]
#[case(None, date(2026, 6, 1), true)]
fn test_project_form_date_order(
    #[case] start: Option<NaiveDate>,
    #[case] end: Option<NaiveDate>,
    #[case] ok: bool,
) {
    let form = ProjectForm {
        name: "Полный метр".into(),
        start_date: start,
        end_date: end,
        ..ProjectForm::default()
    };

    assert_eq!(form.check().is_ok(), ok);
}

#[rstest]
#[case(None, ContractorType::Fl, true)]
#[case(Some(""), ContractorType::Fl, true)]
#[case(Some("770123456789"), ContractorType::Sz, true)]
#[case(Some("7701234567"), ContractorType::Ooo, true)]
#[case(Some("7701234567"), ContractorType::Ip, false)]
#[case(Some("77012345"), ContractorType::Ooo, false)]
#[case(Some("77012345ab"), ContractorType::Ooo, false)]
fn test_contractor_inn(
    #[case] inn: Option<&str>,
    #[case] contractor_type: ContractorType,
    #[case] ok: bool,
) {
    let mut form = ContractorForm::new("Иванов Иван", contractor_type);
    form.inn = inn.map(str::to_string);

    assert_eq!(form.check().is_ok(), ok);
}

#[test]
fn test_contractor_email_shape() {
    let mut form = ContractorForm::new("Иванов Иван", ContractorType::Sz);
    form.email = Some("not-an-email".into());
    assert!(form.check().is_err());

    form.email = Some("ivanov@example.com".into());
    assert!(form.check().is_ok());
}

#[test]
fn test_contractor_form_serializes_type() {
    let form = ContractorForm::new("ООО Свет", ContractorType::Ooo);

    let value = serde_json::to_value(&form).unwrap();

    assert_eq!(value["type"], json!("OOO"));
    assert!(value.get("passport_data").is_none());
}

#[test]
fn test_contract_form_requires_contractor_and_order() {
    let project = ProjectId::new();
    let mut form = ContractForm::new(project, "15/26", PaymentType::PerShift);
    assert!(matches!(form.check(), Err(ClientError::Validation(_))));

    form.contractor_id = Some(ContractorId::new());
    form.valid_from = date(2026, 7, 1);
    form.valid_to = date(2026, 6, 1);
    assert!(matches!(form.check(), Err(ClientError::Invalid(_))));

    form.valid_to = date(2026, 8, 1);
    assert!(form.check().is_ok());
}

#[test]
fn test_tax_scheme_form_needs_component() {
    let form = TaxSchemeForm {
        name: "Пустая".into(),
        components: vec![],
    };

    assert!(matches!(form.check(), Err(ClientError::Validation(_))));
}

#[test]
fn test_tax_scheme_form_checks_component_names() {
    let form = TaxSchemeForm {
        name: "Схема".into(),
        ..TaxSchemeForm::default()
    }
    .with_component(" ", dec!(0.06), TaxKind::Internal, Recipient::Contractor);

    assert!(matches!(form.check(), Err(ClientError::Validation(_))));
}

#[rstest]
#[case(dec!(1), TaxKind::Internal, false)]
#[case(dec!(1), TaxKind::External, true)]
#[case(dec!(1.2), TaxKind::External, false)]
#[case(dec!(0.13), TaxKind::Internal, true)]
fn test_tax_scheme_form_rates(#[case] rate: Decimal, #[case] kind: TaxKind, #[case] ok: bool) {
    let form = TaxSchemeForm {
        name: "Схема".into(),
        ..TaxSchemeForm::default()
    }
    .with_component("Налог", rate, kind, Recipient::Budget);

    assert_eq!(form.check().is_ok(), ok);
}

#[test]
fn test_tax_scheme_form_keeps_order() {
    let form = TaxSchemeForm {
        name: "ИП + НДС".into(),
        ..TaxSchemeForm::default()
    }
    .with_component("УСН", dec!(0.06), TaxKind::Internal, Recipient::Contractor)
    .with_component("НДС", dec!(0.2), TaxKind::External, Recipient::Contractor);

    let components = form.components().unwrap();

    assert_eq!(components[0].name(), "УСН");
    assert_eq!(components[1].sort_order(), 1);
    let value = serde_json::to_value(&form).unwrap();
    assert_eq!(value["components"][1]["type"], json!("EXTERNAL"));
}

#[test]
fn test_line_form_rejects_negative_rate() {
    let mut form = LineForm::new(SubcategoryId::new(), "Оператор");
    form.rate = dec!(-1);

    assert!(matches!(form.check(), Err(ClientError::Validation(_))));
}

#[test]
fn test_entry_form_defaults() {
    let form = EntryForm::default();

    assert_eq!(form.unit, "смена");
    assert_eq!(form.lunch_break_minutes, 60);
    assert!(matches!(form.check(), Err(ClientError::Validation(_))));
}

#[test]
fn test_report_form_day_starts_at_one() {
    let form = ReportForm::new(0, NaiveDate::from_ymd_opt(2026, 6, 3).unwrap());

    assert!(form.check().is_err());
    assert!(ReportForm::new(1, form.date).check().is_ok());
}
