//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results or errors. Comparing parsed JSON (not raw
//! strings) avoids false negatives from field-ordering differences.

use catalog_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Product, ProductClient, ProductDraft};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000/products";

fn client() -> ProductClient {
    ProductClient::new(BASE_URL)
}

fn load(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn pairs(value: &Value) -> Vec<(String, String)> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|h| {
                    let arr = h.as_array().unwrap();
                    (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
                })
                .collect()
        })
        .unwrap_or_default()
}

fn check_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: url");
    if expected.get("headers").is_some() {
        assert_eq!(req.headers, pairs(&expected["headers"]), "{name}: headers");
    }
    match expected.get("body") {
        Some(body) => {
            let actual: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&actual, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: pairs(&sim["headers"]),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn check_error(name: &str, err: ApiError, expected: &Value) {
    match expected["kind"].as_str().unwrap() {
        "Server" => {
            let want = ApiError::Server {
                status: expected["status"].as_u64().unwrap() as u16,
                message: expected["message"].as_str().unwrap().to_string(),
            };
            assert_eq!(err, want, "{name}: error");
        }
        "Validation" => assert!(matches!(err, ApiError::Validation(_)), "{name}: expected Validation"),
        "InconsistentResponse" => {
            assert!(matches!(err, ApiError::InconsistentResponse { .. }), "{name}: expected InconsistentResponse")
        }
        other => panic!("{name}: unknown expected error kind: {other}"),
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_list_products();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_list_products(simulated(&case));
        match case.get("expected_error") {
            Some(expected) => check_error(name, result.unwrap_err(), expected),
            None => {
                let expected: Vec<Product> = serde_json::from_value(case["expected_result"].clone()).unwrap();
                assert_eq!(result.unwrap(), expected, "{name}: parsed result");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let input: ProductDraft = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_create_product(&input).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_create_product(simulated(&case));
        match case.get("expected_error") {
            Some(expected) => check_error(name, result.unwrap_err(), expected),
            None => {
                let expected: Product = serde_json::from_value(case["expected_result"].clone()).unwrap();
                let product = result.unwrap();
                assert_eq!(product, expected, "{name}: parsed result");
                assert!(product.matches(&input), "{name}: fields echo the draft");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_i64().unwrap();
        let input: ProductDraft = serde_json::from_value(case["input"].clone()).unwrap();

        let req = match c.build_update_product(id, &input) {
            Ok(req) => req,
            Err(err) => {
                assert!(case.get("expected_request").is_none(), "{name}: build should succeed");
                check_error(name, err, &case["expected_error"]);
                continue;
            }
        };
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_update_product(simulated(&case));
        match case.get("expected_error") {
            Some(expected) => check_error(name, result.unwrap_err(), expected),
            None => {
                let expected: Product = serde_json::from_value(case["expected_result"].clone()).unwrap();
                assert_eq!(result.unwrap(), expected, "{name}: parsed result");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_i64().unwrap();

        let req = c.build_delete_product(id);
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_delete_product(simulated(&case));
        match case.get("expected_error") {
            Some(expected) => check_error(name, result.unwrap_err(), expected),
            None => assert!(result.is_ok(), "{name}: expected success"),
        }
    }
}
