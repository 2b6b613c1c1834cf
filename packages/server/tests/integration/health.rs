use crate::support::{TestApp, routes};

#[tokio::test]
async fn root_reports_service_running() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::HEALTH).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.message(), "service running");
}

#[tokio::test]
async fn ping_reports_connected_database() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::PING).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.message(), "Connected");
}

#[tokio::test]
async fn ping_fails_while_database_is_unreachable() {
    let app = TestApp::spawn().await;
    app.set_database_available(false);

    let res = app.get(routes::PING).await;
    assert_eq!(res.status, 503);
    assert_eq!(res.body["code"], "DATABASE_UNAVAILABLE");

    // Liveness does not depend on the database.
    let health = app.get(routes::HEALTH).await;
    assert_eq!(health.status, 200);

    app.set_database_available(true);
    assert_eq!(app.get(routes::PING).await.status, 200);
}

#[tokio::test]
async fn openapi_document_lists_routes() {
    let app = TestApp::spawn().await;

    let res = app.get("/api-docs/openapi.json").await;

    assert_eq!(res.status, 200);
    let paths = res.body["paths"].as_object().expect("paths object");
    for path in ["/upload_sprites", "/sprites/{id}", "/scores", "/ping"] {
        assert!(paths.contains_key(path), "missing {path} in OpenAPI paths");
    }
}

#[tokio::test]
async fn openapi_update_bodies_are_free_form_objects() {
    let app = TestApp::spawn().await;

    let res = app.get("/api-docs/openapi.json").await;

    assert_eq!(res.status, 200);
    let schema = &res.body["components"]["schemas"]["UpdateFields"];
    assert_eq!(schema["type"], "object", "UpdateFields schema: {schema}");
    let body = &res.body["paths"]["/scores/{id}"]["put"]["requestBody"];
    assert!(body.is_object(), "PUT /scores/{{id}} should document a request body");
}
