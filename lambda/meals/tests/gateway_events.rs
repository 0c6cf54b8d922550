//! REST API proxy events as API Gateway delivers them, parsed by the runtime
//! and fed to `function_handler`.

use std::sync::Arc;

use lambda_http::http::StatusCode;
use lambda_http::{Body, Response};
use meals::store::MemoryStore;
use meals::{function_handler, MealHandlers};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

const STAGE: &str = "prod";

/// REST (v1) proxy event for the `prod` stage. `path` is what the gateway
/// puts in `path`: decoded, without the stage.
fn rest_event(method: &str, resource: &str, path: &str, params: Value, body: Option<&str>) -> String {
    json!({
        "resource": resource,
        "path": path,
        "httpMethod": method,
        "headers": {
            "Accept": "application/json",
            "Content-Type": "application/json",
            "Host": "abc123.execute-api.us-east-1.amazonaws.com"
        },
        "multiValueHeaders": {
            "Accept": ["application/json"],
            "Content-Type": ["application/json"],
            "Host": ["abc123.execute-api.us-east-1.amazonaws.com"]
        },
        "queryStringParameters": null,
        "multiValueQueryStringParameters": null,
        "pathParameters": params,
        "stageVariables": null,
        "requestContext": {
            "accountId": "123456789012",
            "resourceId": "a1b2c3",
            "stage": STAGE,
            "requestId": "c6af9ac6-7b61-11e6-9a41-93e8deadbeef",
            "requestTime": "09/Apr/2024:12:34:56 +0000",
            "requestTimeEpoch": 1712666096000i64,
            "identity": {
                "sourceIp": "203.0.113.7",
                "userAgent": "curl/8.5.0"
            },
            "path": format!("/{STAGE}{path}"),
            "resourcePath": resource,
            "httpMethod": method,
            "apiId": "abc123",
            "protocol": "HTTP/1.1"
        },
        "body": body,
        "isBase64Encoded": false
    })
    .to_string()
}

async fn send(handlers: &MealHandlers, event: String) -> Response<Body> {
    let request = lambda_http::request::from_str(&event).expect("valid proxy event");
    function_handler(handlers, request)
        .await
        .expect("handler never errors")
}

fn json_body(response: &Response<Body>) -> Value {
    match response.body() {
        Body::Text(text) => serde_json::from_str(text).expect("json body"),
        other => panic!("unexpected body: {other:?}"),
    }
}

fn handlers() -> (MealHandlers, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (MealHandlers::new(store.clone()), store)
}

#[tokio::test]
async fn stage_prefix_does_not_affect_routing() {
    let (handlers, _) = handlers();

    let hello = send(&handlers, rest_event("GET", "/", "/", Value::Null, None)).await;
    assert_eq!(hello.status(), StatusCode::OK);
    assert_eq!(json_body(&hello)["message"], "Hello, world!");

    let listed = send(&handlers, rest_event("GET", "/meals", "/meals", Value::Null, None)).await;
    assert_eq!(listed.status(), StatusCode::OK);
    assert_eq!(json_body(&listed), json!({"success": true, "items": []}));
}

#[tokio::test]
async fn escaped_id_round_trips_through_every_item_route() {
    let (handlers, store) = handlers();
    let id_params = json!({"id": "pho bowl"});

    let created = send(
        &handlers,
        rest_event(
            "POST",
            "/meals",
            "/meals",
            Value::Null,
            Some(r#"{"mealID":"pho bowl","mealName":"Pho","mealType":"Dinner"}"#),
        ),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let fetched = send(
        &handlers,
        rest_event("GET", "/meals/{id}", "/meals/pho bowl", id_params.clone(), None),
    )
    .await;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(json_body(&fetched)["item"]["mealID"], "pho bowl");

    let updated = send(
        &handlers,
        rest_event(
            "PUT",
            "/meals/{id}",
            "/meals/pho bowl",
            id_params.clone(),
            Some(r#"{"mealName":"Bun bo","mealType":"Lunch"}"#),
        ),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(json_body(&updated)["item"]["mealName"], "Bun bo");

    let deleted = send(
        &handlers,
        rest_event("DELETE", "/meals/{id}", "/meals/pho bowl", id_params, None),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::OK);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn greedy_proxy_resource_routes_by_path() {
    let (handlers, _) = handlers();

    let missing = send(
        &handlers,
        rest_event("GET", "/{proxy+}", "/meals/nope", json!({"proxy": "meals/nope"}), None),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(&missing),
        json!({"message": "Meal not found"})
    );

    let unknown = send(
        &handlers,
        rest_event("GET", "/{proxy+}", "/prod", json!({"proxy": "prod"}), None),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(&unknown), json!({"message": "Not found"}));
}

#[tokio::test]
async fn preflight_event_gets_cors_headers() {
    let (handlers, _) = handlers();

    let response = send(
        &handlers,
        rest_event("OPTIONS", "/meals/{id}", "/meals/pho bowl", json!({"id": "pho bowl"}), None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
