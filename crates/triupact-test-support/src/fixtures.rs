//! API payload fixtures shaped like the live endpoints.

use serde_json::{Map, Value, json};

/// Raw record as an endpoint returns it.
pub type Record = Map<String, Value>;

fn records(value: &Value) -> Vec<Record> {
    value
        .as_array()
        .map(|items| items.iter().filter_map(|item| item.as_object().cloned()).collect())
        .unwrap_or_default()
}

/// Wrap records in the `{ "data": [...] }` envelope.
#[must_use]
pub fn list_envelope(items: &[Record]) -> Value {
    json!({ "data": items })
}

/// Departments with mixed name keys.
#[must_use]
pub fn departments() -> Vec<Record> {
    records(&json!([
        {"id": 3, "code": "SCI", "name": "Science"},
        {"id": 1, "code": "ENG", "departmentName": "Engineering"},
        {"code": "MED", "name": null, "title": "Medicine"},
        {"id": 7, "code": "ART", "name": "arts and humanities"},
        {"id": 2, "code": "BKK", "departmentName": "Bangkok Liaison Office"}
    ]))
}

/// Researchers with national ID numbers.
#[must_use]
pub fn researchers() -> Vec<Record> {
    records(&json!([
        {
            "user_id": 11,
            "email": "somchai@psu.ac.th",
            "card_id": "1100000000023",
            "default_role_id": "researcher",
            "department_id": 4,
            "fullname": "Somchai Dee",
            "department_name": "Engineering"
        },
        {
            "user_id": 5,
            "email": "malee@psu.ac.th",
            "card_id": "3100500000007",
            "default_role_id": "admin",
            "department_id": 2,
            "fullname": "Malee Suk",
            "department_name": "Science"
        }
    ]))
}

/// Research ownership forms with open-ended keys.
#[must_use]
pub fn form_research_owner() -> Vec<Record> {
    records(&json!([
        {
            "form_own_id": 2,
            "form_own_code": "OWN-002",
            "form_own_status": "draft",
            "form_own_created_at": "2024-02-01 09:00:00",
            "extra_note": "hidden-marker"
        },
        {
            "form_own_id": 1,
            "form_own_code": "OWN-001",
            "form_own_form_name": "Patent transfer",
            "form_own_date_approve": "2024-03-05",
            "form_own_created_at": "2024-01-15T08:30:00Z",
            "is_ownership": 1
        }
    ]))
}

/// Research plans using the split name fields.
#[must_use]
pub fn form_research_plan() -> Vec<Record> {
    records(&json!([
        {
            "form_plan_id": 9,
            "form_plan_code": "PLAN-9",
            "form_plan_fullname": "Somsri",
            "form_plan_lastname": "Jaidee",
            "form_plan_department": "Science",
            "form_plan_email": "somsri@psu.ac.th",
            "form_plan_start_date": "2024-06-10",
            "form_plan_usage_value": 250_000,
            "form_plan_status": " approved ",
            "objective": [{"text": "Prototype"}]
        }
    ]))
}

/// Users, one without a creation date.
#[must_use]
pub fn users() -> Vec<Record> {
    records(&json!([
        {"id": 1, "email": "older@psu.ac.th", "createdAt": "2023-05-01T00:00:00Z"},
        {"id": 2, "email": "undated@psu.ac.th"},
        {"id": 3, "email": "newest@psu.ac.th", "createdAt": "2024-09-30T12:00:00Z"}
    ]))
}

/// Dashboard counts: eight lookups, seven forms, two people entries.
#[must_use]
pub fn dashboard_summary() -> Value {
    json!({
        "data": {
            "province": 77,
            "departments": 24,
            "educationLevels": 6,
            "mainStudies": 18,
            "roles": 4,
            "funders": 12,
            "researchTypes": 9,
            "positions": 15,
            "formResearchPlan": 130,
            "formResearchOwner": 42,
            "formExtend": 8,
            "formNewFindings": 17,
            "formProgress": 55,
            "formFinal": 21,
            "formPublish": 3,
            "users": 1284,
            "researchers": 640
        }
    })
}

/// Successful login body.
#[must_use]
pub fn login_success(session_id: &str, expires_at: &str) -> Value {
    json!({
        "success": true,
        "session": {"id": session_id, "expiresAt": expires_at}
    })
}

/// Rejected login body.
#[must_use]
pub fn login_failure(message: &str) -> Value {
    json!({"success": false, "error": message})
}

/// Session file contents as the CLI persists them.
#[must_use]
pub fn session_file(token: &str, expires_at_millis: i64) -> String {
    json!({"token": token, "token_exp": expires_at_millis.to_string()}).to_string()
}
