use serde_json::{json, Value};
use wiremock::{
    matchers::{body_string, method, path},
    Mock, ResponseTemplate,
};

use crate::helper::{spawn_app, LIST_PATH};

#[tokio::test]
async fn valid_subscribe() {
    let app = spawn_app().await;

    Mock::given(path(LIST_PATH))
        .and(method("POST"))
        .and(body_string("email=git%40github.com"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.list_server)
        .await;

    let res = app.post_subscribe(&json!({ "email": "git@github.com" })).await;
    assert_eq!(200, res.status().as_u16());
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn invalid_subscribe() {
    let app = spawn_app().await;

    Mock::given(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.list_server)
        .await;

    let datas = [
        (json!({ "email": "" }), "email is empty."),
        (json!({ "email": "gitgithub.com" }), "email has no `@`."),
        (json!({}), "email is missing."),
        (json!({ "email": null }), "email is null."),
    ];
    for (body, payload) in datas {
        let res = app.post_subscribe(&body).await;
        assert_eq!(400, res.status().as_u16(), "{payload}");
        let body: Value = res.json().await.unwrap();
        assert_eq!(body, json!({ "ok": false, "error": "invalid email" }), "{payload}");
    }
}

#[tokio::test]
async fn provider_failure_is_reported_as_500() {
    let app = spawn_app().await;

    Mock::given(path(LIST_PATH))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(422))
        .expect(1)
        .mount(&app.list_server)
        .await;

    let res = app.post_subscribe(&json!({ "email": "git@github.com" })).await;
    assert_eq!(500, res.status().as_u16());
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "ok": false, "error": "subscription failed" }));
}

#[tokio::test]
async fn malformed_subscribe_body_is_500() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/subscribe", &app.address))
        .header("Content-Type", "application/json")
        .body("email=git@github.com")
        .send()
        .await
        .expect("failed to execute request.");
    assert_eq!(500, res.status().as_u16());
}

#[tokio::test]
async fn oversized_subscribe_body_is_500() {
    let app = spawn_app().await;

    let email = format!("{}@example.com", "x".repeat(300_000));
    let res = app.post_subscribe(&json!({ "email": email })).await;
    assert_eq!(500, res.status().as_u16());
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "ok": false, "error": "subscription failed" }));
}
