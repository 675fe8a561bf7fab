//! End-to-end tests over the fixture datasets in `tests/fixtures/`.
//!
//! Run with: cargo test --test integration

use std::path::PathBuf;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use provider_directory::api::{create_router, AppState};
use provider_directory::directory::{derive_city, search, DataStore, NetworkStatus, SearchCriteria};
use provider_directory::error::{DataError, Dataset};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture_store() -> DataStore {
    DataStore::load(&fixture("providers.json"), &fixture("plans.json")).unwrap()
}

fn app() -> Router {
    create_router(AppState::new(fixture_store()))
}

async fn post_search(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn ids(results: &Value) -> Vec<i64> {
    results
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect()
}

fn statuses(results: &Value) -> Vec<String> {
    results
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["network_status"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn specialty_filter_keeps_exact_matches_only() {
    let store = fixture_store();

    for provider in store.providers() {
        let criteria = SearchCriteria {
            specialty: Some(provider.specialty.clone()),
            ..SearchCriteria::default()
        };
        let results = search(&store, &criteria);

        assert!(results.iter().any(|r| r.provider.id == provider.id));
        assert!(results.iter().all(|r| r.provider.specialty == provider.specialty));
    }
}

#[test]
fn city_filter_matches_any_address_substring() {
    let fixtures = fixture_store();
    let mut providers = fixtures.providers().to_vec();
    providers.push(
        serde_json::from_value(json!({
            "id": 6,
            "name": "Dr. Müller",
            "specialty": "Dermatology",
            "address": "Bahnhofstraße 1, Zürich",
            "accepted_plan_ids": [20]
        }))
        .unwrap(),
    );
    let store = DataStore::from_records(providers, fixtures.plans().to_vec());

    for provider in store.providers() {
        // Every non-empty tail of the address selects the provider.
        let needle = address_tail(&provider.address);
        if needle.is_empty() {
            continue;
        }
        let criteria = SearchCriteria {
            city: Some(needle.to_string()),
            ..SearchCriteria::default()
        };

        assert!(search(&store, &criteria)
            .iter()
            .any(|r| r.provider.id == provider.id));
    }
}

/// Second half of `address`, split on a character boundary.
fn address_tail(address: &str) -> &str {
    let middle = address.chars().count() / 2;
    let start = address
        .char_indices()
        .nth(middle)
        .map_or(address.len(), |(i, _)| i);
    &address[start..]
}

#[test]
fn address_tail_respects_multibyte_characters() {
    assert_eq!(address_tail("Zürich"), "ich");
    assert_eq!(address_tail("1 Main St, Springfield"), "Springfield");
    assert_eq!(address_tail(""), "");
}

#[test]
fn plan_status_follows_accepted_plans() {
    let store = fixture_store();
    let plan_ids: Vec<i64> = store.plans().iter().map(|p| p.id).chain([99]).collect();

    for plan_id in plan_ids {
        let criteria = SearchCriteria {
            plan_id: Some(plan_id.into()),
            ..SearchCriteria::default()
        };
        for result in search(&store, &criteria) {
            let expected = if result.provider.accepted_plan_ids.contains(&plan_id) {
                NetworkStatus::InNetwork
            } else {
                NetworkStatus::OutOfNetwork
            };
            assert_eq!(result.network_status, expected);
        }
    }
}

#[test]
fn missing_fixture_fails_the_load() {
    let err = DataStore::load(&fixture("providers.json"), &fixture("missing.json")).unwrap_err();
    assert!(matches!(
        err,
        DataError::Read {
            dataset: Dataset::Plans,
            ..
        }
    ));
}

#[test]
fn derived_cities_skip_comma_free_addresses() {
    let store = fixture_store();

    assert_eq!(derive_city("1 Main St, Springfield"), Some("Springfield"));
    assert_eq!(derive_city("1 Main St"), None);
    assert_eq!(
        store.cities(),
        vec!["Capital City", "Shelbyville", "Springfield"]
    );
}

#[tokio::test]
async fn search_without_plan_is_unknown_for_all() {
    let (status, body) = post_search(app(), json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2, 3, 4, 5]);
    assert!(statuses(&body).iter().all(|s| s == "unknown"));

    let (_, body) = post_search(app(), json!({"plan_id": ""})).await;
    assert!(statuses(&body).iter().all(|s| s == "unknown"));
}

#[tokio::test]
async fn cardiology_with_plan_ten() {
    let (status, body) = post_search(app(), json!({"specialty": "Cardiology", "plan_id": 10})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 3, 5]);
    assert_eq!(
        statuses(&body),
        vec!["in-network", "out-of-network", "out-of-network"]
    );
}

#[tokio::test]
async fn plan_id_string_and_integer_agree() {
    let (_, as_int) = post_search(app(), json!({"plan_id": 20})).await;
    let (_, as_text) = post_search(app(), json!({"plan_id": "20"})).await;

    assert_eq!(as_int, as_text);
}

#[tokio::test]
async fn city_substring_matches_street_names() {
    let (_, body) = post_search(app(), json!({"city": "Springfield"})).await;

    // Provider 3 is in Capital City on Springfield Rd.
    assert_eq!(ids(&body), vec![1, 3]);
}

#[tokio::test]
async fn results_carry_provider_fields() {
    let (_, body) = post_search(app(), json!({"specialty": "Cardiology", "city": "Main"})).await;

    assert_eq!(
        body,
        json!([{
            "id": 1,
            "name": "Dr. Asha Rao",
            "specialty": "Cardiology",
            "address": "1 Main St, Springfield",
            "accepted_plan_ids": [10, 20],
            "lat": 39.78,
            "lng": -89.65,
            "network_status": "unknown"
        }])
    );
}

#[tokio::test]
async fn no_match_is_an_empty_list() {
    let (status, body) = post_search(app(), json!({"specialty": "Oncology"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn non_integer_plan_id_is_a_client_error() {
    let (status, body) = post_search(app(), json!({"specialty": "Cardiology", "plan_id": "gold"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("invalid_plan_id"));
}

#[tokio::test]
async fn plan_id_beyond_i64_is_out_of_network() {
    let (status, body) = post_search(app(), json!({"plan_id": u64::MAX})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2, 3, 4, 5]);
    assert!(statuses(&body).iter().all(|s| s == "out-of-network"));

    let (status, body) = post_search(app(), json!({"plan_id": "99999999999999999999"})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(statuses(&body).iter().all(|s| s == "out-of-network"));
}

#[tokio::test]
async fn integral_float_plan_id_matches_integer() {
    let (_, as_float) = post_search(app(), json!({"plan_id": 10.0})).await;
    let (_, as_int) = post_search(app(), json!({"plan_id": 10})).await;

    assert_eq!(as_float, as_int);
}

#[tokio::test]
async fn identical_searches_are_identical() {
    let query = json!({"city": "Shelbyville", "plan_id": "20"});
    let app = app();

    let (_, first) = post_search(app.clone(), query.clone()).await;
    let (_, second) = post_search(app, query).await;

    assert_eq!(first, second);
    assert_eq!(ids(&first), vec![2, 5]);
    assert_eq!(statuses(&first), vec!["in-network", "out-of-network"]);
}
