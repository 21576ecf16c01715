#![allow(dead_code)]

use serde_json::Value;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Pull a string field out of a JSON body, failing the test if absent.
pub fn str_field<'a>(json: &'a Value, field: &str) -> &'a str {
    json[field]
        .as_str()
        .unwrap_or_else(|| panic!("field {field} should be a string in {json}"))
}

/// Pull an integer field out of a JSON body, failing the test if absent.
pub fn i64_field(json: &Value, field: &str) -> i64 {
    json[field]
        .as_i64()
        .unwrap_or_else(|| panic!("field {field} should be an integer in {json}"))
}
