mod common;

use axum::body::Body;
use chrono::DateTime;
use common::*;
use serde_json::json;

#[tokio::test]
async fn acceptance_project_crud() {
    let t = app();
    let token = bearer(&t.router).await;

    // create
    let res = call(&t.router, &token, "POST", "/projects", Some(json!({ "name": "Groceries" }))).await;
    assert_eq!(res.status(), 201);
    let created = json(res).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["name"], "Groceries");
    assert!(DateTime::parse_from_rfc3339(created["createdAt"].as_str().unwrap()).is_ok());

    // get
    let res = call(&t.router, &token, "GET", &format!("/projects/{id}"), None).await;
    assert_eq!(res.status(), 200);
    assert_eq!(json(res).await, created);

    // list
    let res = call(&t.router, &token, "GET", "/projects", None).await;
    assert_eq!(res.status(), 200);
    assert_eq!(json(res).await.as_array().unwrap().len(), 1);

    // update
    let res = call(&t.router, &token, "PUT", &format!("/projects/{id}"), Some(json!({ "name": "Errands" }))).await;
    assert_eq!(res.status(), 200);
    let updated = json(res).await;
    assert_eq!(updated["name"], "Errands");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    // delete
    let res = call(&t.router, &token, "DELETE", &format!("/projects/{id}"), None).await;
    assert_eq!(res.status(), 204);
    assert!(body_bytes(res).await.is_empty());

    // gone
    let res = call(&t.router, &token, "GET", &format!("/projects/{id}"), None).await;
    assert_eq!(res.status(), 404);
    let res = call(&t.router, &token, "DELETE", &format!("/projects/{id}"), None).await;
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn project_ids_strictly_increase() {
    let t = app();
    let token = bearer(&t.router).await;
    let mut last = 0u64;
    for i in 0..5 {
        let res = call(&t.router, &token, "POST", "/projects", Some(json!({ "name": format!("p{i}") }))).await;
        let id: u64 = json(res).await["id"].as_str().unwrap().parse().unwrap();
        assert!(id > last);
        last = id;
        if i == 2 {
            call(&t.router, &token, "DELETE", &format!("/projects/{id}"), None).await;
        }
    }
}

#[tokio::test]
async fn project_validation_is_plain_text_400() {
    let t = app();
    let token = bearer(&t.router).await;

    let res = call(&t.router, &token, "POST", "/projects", Some(json!({ "name": "   " }))).await;
    assert_eq!(res.status(), 400);
    assert!(res.headers()["content-type"].to_str().unwrap().starts_with("text/plain"));
    assert_eq!(text(res).await, "name is required");

    let res = request(&t.router, "POST", "/projects", Some(&token), Some(Body::from("{oops"))).await;
    assert_eq!(res.status(), 400);

    let res = call(&t.router, &token, "PUT", "/projects/1", Some(json!({ "name": "x" }))).await;
    assert_eq!(res.status(), 404);

    let res = call(&t.router, &token, "POST", "/projects", Some(json!({ "name": "ok" }))).await;
    let id = json(res).await["id"].as_str().unwrap().to_string();
    let res = call(&t.router, &token, "PUT", &format!("/projects/{id}"), Some(json!({ "name": 7 }))).await;
    assert_eq!(res.status(), 400);
}

#[tokio::test]
async fn acceptance_todo_crud() {
    let t = app();
    let token = bearer(&t.router).await;
    let res = call(&t.router, &token, "POST", "/projects", Some(json!({ "name": "Home" }))).await;
    let project = json(res).await["id"].as_str().unwrap().to_string();

    let res = call(&t.router, &token, "POST", &format!("/projects/{project}/todos"),
        Some(json!({ "title": " Milk ", "dueDate": "2024-05-01" }))).await;
    assert_eq!(res.status(), 201);
    let todo = json(res).await;
    let id = todo["id"].as_str().unwrap().to_string();
    assert_eq!(todo["projectId"], project.as_str());
    assert_eq!(todo["title"], "Milk");
    assert_eq!(todo["completed"], false);
    assert_eq!(todo["dueDate"], "2024-05-01");

    let res = call(&t.router, &token, "GET", &format!("/projects/{project}/todos"), None).await;
    assert_eq!(json(res).await.as_array().unwrap().len(), 1);

    let res = call(&t.router, &token, "PUT", &format!("/todos/{id}"), Some(json!({ "completed": true }))).await;
    assert_eq!(res.status(), 200);
    let updated = json(res).await;
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["title"], "Milk");
    assert_eq!(updated["dueDate"], "2024-05-01");

    let res = call(&t.router, &token, "DELETE", &format!("/todos/{id}"), None).await;
    assert_eq!(res.status(), 204);
    let res = call(&t.router, &token, "GET", &format!("/todos/{id}"), None).await;
    assert_eq!(res.status(), 404);
    assert_eq!(text(res).await, "Not found");
}

#[tokio::test]
async fn todo_create_defaults_and_lenient_fields() {
    let t = app();
    let token = bearer(&t.router).await;
    call(&t.router, &token, "POST", "/projects", Some(json!({ "name": "p" }))).await;

    let res = call(&t.router, &token, "POST", "/projects/1/todos",
        Some(json!({ "title": "t", "completed": "yes", "dueDate": 20240501 }))).await;
    assert_eq!(res.status(), 201);
    let todo = json(res).await;
    assert_eq!(todo["completed"], false);
    assert!(todo["dueDate"].is_null());

    let res = call(&t.router, &token, "POST", "/projects/1/todos", Some(json!({ "title": "" }))).await;
    assert_eq!(res.status(), 400);
    assert_eq!(text(res).await, "title is required");
}

#[tokio::test]
async fn todo_under_missing_project_is_404() {
    let t = app();
    let token = bearer(&t.router).await;
    for body in [json!({ "title": "valid" }), json!({})] {
        let res = call(&t.router, &token, "POST", "/projects/does-not-exist/todos", Some(body)).await;
        assert_eq!(res.status(), 404);
    }
    let res = call(&t.router, &token, "GET", "/projects/does-not-exist/todos", None).await;
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn todo_update_is_type_strict() {
    let t = app();
    let token = bearer(&t.router).await;
    call(&t.router, &token, "POST", "/projects", Some(json!({ "name": "p" }))).await;
    let res = call(&t.router, &token, "POST", "/projects/1/todos", Some(json!({ "title": "t", "completed": true }))).await;
    let id = json(res).await["id"].as_str().unwrap().to_string();

    let res = call(&t.router, &token, "PUT", &format!("/todos/{id}"),
        Some(json!({ "completed": "false", "title": 3, "dueDate": null }))).await;
    assert_eq!(res.status(), 200);
    let todo = json(res).await;
    assert_eq!(todo["completed"], true);
    assert_eq!(todo["title"], "t");

    // Malformed JSON on update is a no-op, not an error.
    let res = request(&t.router, "PUT", &format!("/todos/{id}"), Some(&token), Some(Body::from("not json"))).await;
    assert_eq!(res.status(), 200);
    assert_eq!(json(res).await["title"], "t");
}

#[tokio::test]
async fn deleting_project_leaves_dangling_todos() {
    let t = app();
    let token = bearer(&t.router).await;
    call(&t.router, &token, "POST", "/projects", Some(json!({ "name": "a" }))).await;
    call(&t.router, &token, "POST", "/projects", Some(json!({ "name": "b" }))).await;
    call(&t.router, &token, "POST", "/projects/1/todos", Some(json!({ "title": "x" }))).await;
    call(&t.router, &token, "POST", "/projects/2/todos", Some(json!({ "title": "y" }))).await;

    let res = call(&t.router, &token, "DELETE", "/projects/1", None).await;
    assert_eq!(res.status(), 204);

    let res = call(&t.router, &token, "GET", "/todos/1", None).await;
    assert_eq!(res.status(), 200);
    assert_eq!(json(res).await["projectId"], "1");

    let res = call(&t.router, &token, "GET", "/todos", None).await;
    assert_eq!(json(res).await.as_array().unwrap().len(), 2);

    let res = call(&t.router, &token, "GET", "/projects/1/todos", None).await;
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn project_ids_are_matched_exactly() {
    let t = app();
    let token = bearer(&t.router).await;
    call(&t.router, &token, "POST", "/projects", Some(json!({ "name": "p" }))).await;

    for alias in ["01", "+1", "0001", "%31"] {
        let res = call(&t.router, &token, "GET", &format!("/projects/{alias}"), None).await;
        assert_eq!(res.status(), 404, "GET /projects/{alias}");
        let res = call(&t.router, &token, "PUT", &format!("/projects/{alias}"), Some(json!({ "name": "q" }))).await;
        assert_eq!(res.status(), 404, "PUT /projects/{alias}");
        let res = call(&t.router, &token, "DELETE", &format!("/projects/{alias}"), None).await;
        assert_eq!(res.status(), 404, "DELETE /projects/{alias}");
    }

    let res = call(&t.router, &token, "GET", "/projects/1", None).await;
    assert_eq!(res.status(), 200);
    assert_eq!(json(res).await["name"], "p");
}

#[tokio::test]
async fn todo_ids_are_matched_exactly() {
    let t = app();
    let token = bearer(&t.router).await;
    call(&t.router, &token, "POST", "/projects", Some(json!({ "name": "p" }))).await;
    call(&t.router, &token, "POST", "/projects/1/todos", Some(json!({ "title": "x" }))).await;

    for alias in ["01", "+1", "%31"] {
        let res = call(&t.router, &token, "GET", &format!("/todos/{alias}"), None).await;
        assert_eq!(res.status(), 404, "GET /todos/{alias}");
        let res = call(&t.router, &token, "PUT", &format!("/todos/{alias}"), Some(json!({ "completed": true }))).await;
        assert_eq!(res.status(), 404, "PUT /todos/{alias}");
        let res = call(&t.router, &token, "DELETE", &format!("/todos/{alias}"), None).await;
        assert_eq!(res.status(), 404, "DELETE /todos/{alias}");
    }

    let res = call(&t.router, &token, "GET", "/todos/1", None).await;
    let todo = json(res).await;
    assert_eq!(todo["completed"], false);
}

#[tokio::test]
async fn aliased_parent_path_cannot_own_todos() {
    let t = app();
    let token = bearer(&t.router).await;
    call(&t.router, &token, "POST", "/projects", Some(json!({ "name": "p" }))).await;

    for alias in ["01", "+1", "%31"] {
        let res = call(&t.router, &token, "POST", &format!("/projects/{alias}/todos"), Some(json!({ "title": "x" }))).await;
        assert_eq!(res.status(), 404, "POST /projects/{alias}/todos");
        let res = call(&t.router, &token, "GET", &format!("/projects/{alias}/todos"), None).await;
        assert_eq!(res.status(), 404, "GET /projects/{alias}/todos");
    }

    let res = call(&t.router, &token, "POST", "/projects/1/todos", Some(json!({ "title": "y" }))).await;
    assert_eq!(res.status(), 201);
    assert_eq!(json(res).await["projectId"], "1");

    let res = call(&t.router, &token, "GET", "/todos", None).await;
    let all = json(res).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
    assert!(all.as_array().unwrap().iter().all(|t| t["projectId"] == "1"));
}
