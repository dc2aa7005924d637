//! Shared fixtures for client integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use filmbudget_client::{ApiClient, MemoryTokenStore, Session};
use filmbudget_shared::TokenPair;
use serde_json::{Value, json};
use wiremock::MockServer;

pub const PROJECT: &str = "0190a5b2-7c3e-7000-8000-000000000001";
pub const CATEGORY: &str = "0190a5b2-7c3e-7000-8000-000000000010";
pub const SUBCATEGORY: &str = "0190a5b2-7c3e-7000-8000-000000000020";
pub const CAMERA_LINE: &str = "0190a5b2-7c3e-7000-8000-000000000031";
pub const SOUND_LINE: &str = "0190a5b2-7c3e-7000-8000-000000000032";
pub const SZ_SCHEME: &str = "0190a5b2-7c3e-7000-8000-000000000041";
pub const NDS_SCHEME: &str = "0190a5b2-7c3e-7000-8000-000000000042";
pub const CONTRACTOR: &str = "0190a5b2-7c3e-7000-8000-000000000051";
pub const CONTRACT: &str = "0190a5b2-7c3e-7000-8000-000000000061";

/// Client whose session already holds `access-1` / `refresh-1`.
pub fn authenticated_client(server: &MockServer) -> Arc<ApiClient> {
    let tokens = TokenPair::new("access-1".into(), "refresh-1".into(), Some(900));
    let session = Session::init(MemoryTokenStore::with_tokens(tokens)).unwrap();
    Arc::new(ApiClient::with_base_url(server.uri(), Arc::new(session)).unwrap())
}

/// Client without tokens.
pub fn anonymous_client(server: &MockServer) -> Arc<ApiClient> {
    Arc::new(ApiClient::with_base_url(server.uri(), Arc::new(Session::in_memory())).unwrap())
}

pub fn project_json() -> Value {
    json!({
        "id": PROJECT,
        "name": "Короткий метр",
        "start_date": "2026-06-01",
        "end_date": "2026-06-30",
        "currency": "RUB",
        "status": "ACTIVE",
        "params": []
    })
}

/// Camera: ФЛ 13/30, 1000 x 10, limit 14000. Sound: СЗ 6%, 2000 x 5.
pub fn tree_json() -> Value {
    json!([{
        "id": CATEGORY,
        "name": "Съёмочная группа",
        "order_index": 0,
        "subcategories": [{
            "id": SUBCATEGORY,
            "category_id": CATEGORY,
            "name": "Операторский цех",
            "order_index": 0,
            "lines": [
                {
                    "id": CAMERA_LINE,
                    "subcategory_id": SUBCATEGORY,
                    "name": "Оператор-постановщик",
                    "unit": "Смена",
                    "rate": "1000",
                    "qty_plan": "10",
                    "tax_type": "ФЛ",
                    "tax_rate_1": "13",
                    "tax_rate_2": "30",
                    "limit_amount": "14000",
                    "order_index": 0
                },
                {
                    "id": SOUND_LINE,
                    "subcategory_id": SUBCATEGORY,
                    "name": "Звукорежиссёр",
                    "unit": "Смена",
                    "rate": "2000",
                    "qty_plan": "5",
                    "tax_scheme_id": SZ_SCHEME,
                    "order_index": 1
                }
            ]
        }]
    }])
}

pub fn schemes_json() -> Value {
    json!([
        {
            "id": SZ_SCHEME,
            "name": "СЗ 6%",
            "is_system": true,
            "components": [
                {"name": "НПД", "rate": "0.06", "type": "INTERNAL", "recipient": "CONTRACTOR", "sort_order": 0}
            ]
        },
        {
            "id": NDS_SCHEME,
            "name": "НДС 20%",
            "is_system": false,
            "components": [
                {"name": "НДС", "rate": "0.2", "type": "EXTERNAL", "recipient": "CONTRACTOR", "sort_order": 0}
            ]
        }
    ])
}

pub fn contractors_json() -> Value {
    json!([{
        "id": CONTRACTOR,
        "full_name": "Петров Пётр",
        "type": "SZ",
        "inn": "770123456789",
        "currency": "RUB",
        "tax_scheme_id": SZ_SCHEME
    }])
}
