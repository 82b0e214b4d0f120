//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use cms_core::types::{CreateShowDto, UpdateShowDto};
use cms_core::{ApiError, CmsClient, HttpMethod, HttpRequest, HttpResponse, RequestBody};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> CmsClient {
    CmsClient::new(BASE_URL)
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

fn assert_request(name: &str, req: &HttpRequest, expected: &serde_json::Value) {
    assert_eq!(
        req.method,
        parse_method(expected["method"].as_str().unwrap()),
        "{name}: method"
    );
    assert_eq!(
        req.path,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: path"
    );
    if let Some(expected_headers) = expected.get("headers") {
        let headers: Vec<(String, String)> = expected_headers
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let pair = h.as_array().unwrap();
                (
                    pair[0].as_str().unwrap().to_string(),
                    pair[1].as_str().unwrap().to_string(),
                )
            })
            .collect();
        assert_eq!(req.headers, headers, "{name}: headers");
    }
    if let Some(expected_body) = expected.get("body") {
        let Some(RequestBody::Json(body)) = &req.body else {
            panic!("{name}: expected a JSON body");
        };
        let body: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(&body, expected_body, "{name}: body");
    } else {
        assert!(req.body.is_none(), "{name}: body should be None");
    }
}

fn simulated_response(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn assert_expected_error(name: &str, err: &ApiError, expected: &serde_json::Value) {
    match expected["kind"].as_str().unwrap() {
        "Request" => {
            let status = expected["status"].as_u64().unwrap() as u16;
            assert!(
                matches!(err, ApiError::Request { status: s, .. } if *s == status),
                "{name}: expected Request {{ status: {status} }}, got {err}"
            );
        }
        "Mapping" => {
            assert!(
                matches!(err, ApiError::Mapping(_)),
                "{name}: expected Mapping, got {err}"
            );
        }
        other => panic!("{name}: unknown expected_error kind: {other}"),
    }
}

// ---------------------------------------------------------------------------
// User pagination
// ---------------------------------------------------------------------------

#[test]
fn user_pagination_test_vectors() {
    let raw = include_str!("../../test-vectors/user-pagination.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let limit = case["limit"].as_u64().unwrap() as u32;
        let page = case["page"].as_u64().unwrap() as u32;

        let req = c.build_user_pagination(limit, page);
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_user_pagination(simulated_response(case));

        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, &result.unwrap_err(), expected_error);
            continue;
        }

        let page = result.unwrap();
        let expected = &case["expected_result"];
        assert_eq!(
            u64::from(page.total_items),
            expected["totalItems"].as_u64().unwrap(),
            "{name}: totalItems"
        );
        assert_eq!(
            u64::from(page.total_pages),
            expected["totalPages"].as_u64().unwrap(),
            "{name}: totalPages"
        );
        assert_eq!(
            u64::from(page.page_number),
            expected["pageNumber"].as_u64().unwrap(),
            "{name}: pageNumber"
        );
        assert_eq!(
            page.is_last(),
            expected["isLast"].as_bool().unwrap(),
            "{name}: isLast"
        );

        let options: Vec<(String, String)> = page
            .items
            .iter()
            .map(|user| {
                let item = user.to_select_item();
                (item.id, item.label)
            })
            .collect();
        let expected_options: Vec<(String, String)> = expected["options"]
            .as_array()
            .unwrap()
            .iter()
            .map(|pair| {
                let pair = pair.as_array().unwrap();
                (
                    pair[0].as_str().unwrap().to_string(),
                    pair[1].as_str().unwrap().to_string(),
                )
            })
            .collect();
        assert_eq!(options, expected_options, "{name}: options");
    }
}

// ---------------------------------------------------------------------------
// Show CRUD
// ---------------------------------------------------------------------------

#[test]
fn show_create_test_vectors() {
    let raw = include_str!("../../test-vectors/show-crud.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["create"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: CreateShowDto = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_create_show(&input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let id = c.parse_create_show(simulated_response(case)).unwrap();
        assert_eq!(id, case["expected_id"].as_str().unwrap(), "{name}: id");
    }
}

#[test]
fn show_get_test_vectors() {
    let raw = include_str!("../../test-vectors/show-crud.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["get"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();

        let req = c.build_get_show(id);
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_get_show(simulated_response(case));

        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, &result.unwrap_err(), expected_error);
            continue;
        }

        let show = result.unwrap();
        let expected = &case["expected_result"];
        assert_eq!(show.name, expected["name"].as_str().unwrap(), "{name}: name");
        assert_eq!(
            show.description,
            expected["description"].as_str().unwrap(),
            "{name}: description"
        );
        let labels: Vec<&str> = show.moderators.iter().map(|m| m.nickname.as_str()).collect();
        let expected_labels: Vec<&str> = expected["moderatorLabels"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l.as_str().unwrap())
            .collect();
        assert_eq!(labels, expected_labels, "{name}: moderators");
        assert_eq!(
            show.profile_image.as_ref().map(|i| i.id.as_str()),
            expected.get("profileImageId").and_then(|v| v.as_str()),
            "{name}: profile image"
        );
    }
}

#[test]
fn show_update_test_vectors() {
    let raw = include_str!("../../test-vectors/show-crud.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["update"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();
        let input: UpdateShowDto = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_update_show(id, &input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_update_show(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, &result.unwrap_err(), expected_error);
        } else {
            assert!(result.is_ok(), "{name}: expected success");
        }
    }
}

#[test]
fn show_delete_test_vectors() {
    let raw = include_str!("../../test-vectors/show-crud.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["delete"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();

        let req = c.build_delete_show(id);
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_delete_show(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, &result.unwrap_err(), expected_error);
        } else {
            assert!(result.is_ok(), "{name}: expected success");
        }
    }
}
