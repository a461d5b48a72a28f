//! Task creation, listing, editing and deletion through the router

mod support;

use axum::http::StatusCode;
use serde_json::Value;
use support::{TestContext, location, view_data};

fn titles(tasks: &Value) -> Vec<String> {
    tasks
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["title"].as_str().unwrap().to_string())
        .collect()
}

async fn create_project(ctx: &TestContext, admin: &str, name: &str) -> i64 {
    let response = ctx
        .post_form("/create_project", &format!("name={}", name), Some(admin))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    location(&response)
        .trim_start_matches("/projects/")
        .parse()
        .unwrap()
}

#[tokio::test]
async fn test_added_task_is_listed_once_as_pending() {
    let ctx = TestContext::new().await;
    let cookie = ctx.member_session("alice").await;

    let response = ctx.post_form("/add", "task=Buy+milk", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let tasks = view_data(ctx.get("/", Some(&cookie)).await, "index").await;
    let matching: Vec<&Value> = tasks
        .as_array()
        .unwrap()
        .iter()
        .filter(|task| task["title"] == "Buy milk")
        .collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0]["status"], "pending");
    assert_eq!(matching[0]["project_id"], Value::Null);
}

#[tokio::test]
async fn test_blank_task_is_ignored() {
    let ctx = TestContext::new().await;
    let cookie = ctx.member_session("alice").await;

    let response = ctx.post_form("/add", "task=+++", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let response = ctx.post_form("/add", "", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    assert_eq!(ctx.count("tasks").await, 0);
}

#[tokio::test]
async fn test_edit_status_keeps_title() {
    let ctx = TestContext::new().await;
    let cookie = ctx.member_session("bob").await;
    ctx.post_form("/add", "task=Walk+dog", Some(&cookie)).await;

    let task = view_data(ctx.get("/edit/1", Some(&cookie)).await, "edit").await;
    assert_eq!(task["title"], "Walk dog");

    let response = ctx
        .post_form("/edit/1", "title=&status=completed", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let tasks = view_data(ctx.get("/", Some(&cookie)).await, "index").await;
    assert_eq!(tasks[0]["title"], "Walk dog");
    assert_eq!(tasks[0]["status"], "completed");

    let response = ctx
        .post_form("/edit/1", "title=Walk+cat&status=in+progress", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let tasks = view_data(ctx.get("/", Some(&cookie)).await, "index").await;
    assert_eq!(tasks[0]["title"], "Walk cat");
    assert_eq!(tasks[0]["status"], "in progress");
}

#[tokio::test]
async fn test_edit_rejects_bad_input_and_missing_tasks() {
    let ctx = TestContext::new().await;
    let cookie = ctx.member_session("bob").await;
    ctx.post_form("/add", "task=Walk+dog", Some(&cookie)).await;

    let response = ctx.post_form("/edit/1", "status=done", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = ctx.get("/edit/99", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = ctx
        .post_form("/edit/99", "status=completed", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Blank fields change nothing, yet the task must still exist
    let response = ctx
        .post_form("/edit/99", "title=&status=", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = ctx.post_form("/edit/1", "title=&status=", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_delete_removes_task_from_store() {
    let ctx = TestContext::new().await;
    let cookie = ctx.member_session("carol").await;
    ctx.post_form("/add", "task=First", Some(&cookie)).await;
    ctx.post_form("/add", "task=Second", Some(&cookie)).await;

    let response = ctx.get("/delete/1", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let tasks = view_data(ctx.get("/", Some(&cookie)).await, "index").await;
    assert_eq!(titles(&tasks), vec!["Second"]);

    // Deleting again is a no-op
    let response = ctx.get("/delete/1", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_project_scoped_task_lifecycle() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_session("root").await;
    let home = create_project(&ctx, &admin, "Home").await;
    let work = create_project(&ctx, &admin, "Work").await;

    let response = ctx
        .post_form(
            &format!("/projects/{}/add_task", home),
            "title=Fix+sink",
            Some(&admin),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/projects/{}", home));
    ctx.post_form(
        &format!("/projects/{}/add_task", home),
        "title=Paint+fence",
        Some(&admin),
    )
    .await;

    let tasks = view_data(
        ctx.get(&format!("/projects/{}/tasks", home), Some(&admin)).await,
        "project_tasks",
    )
    .await;
    assert_eq!(titles(&tasks), vec!["Fix sink", "Paint fence"]);
    let task_id = tasks[0]["id"].as_i64().unwrap();

    // Editing through the wrong project finds nothing
    let response = ctx
        .get(
            &format!("/projects/{}/edit_task/{}", work, task_id),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = ctx
        .post_form(
            &format!("/projects/{}/edit_task/{}", home, task_id),
            "status=completed",
            Some(&admin),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let completed = view_data(
        ctx.get(
            &format!("/projects/{}/tasks/status/completed", home),
            Some(&admin),
        )
        .await,
        "project_tasks",
    )
    .await;
    assert_eq!(titles(&completed), vec!["Fix sink"]);

    // Deleting through the wrong project leaves the task alone
    ctx.get(
        &format!("/projects/{}/delete_task/{}", work, task_id),
        Some(&admin),
    )
    .await;
    assert_eq!(ctx.count("tasks").await, 2);

    let response = ctx
        .get(
            &format!("/projects/{}/delete_task/{}", home, task_id),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/projects/{}", home));

    let tasks = view_data(
        ctx.get(&format!("/projects/{}/tasks", home), Some(&admin)).await,
        "project_tasks",
    )
    .await;
    assert_eq!(titles(&tasks), vec!["Paint fence"]);

    let detail = view_data(
        ctx.get(&format!("/projects/{}", home), Some(&admin)).await,
        "project",
    )
    .await;
    assert_eq!(detail["project"]["name"], "Home");
    assert_eq!(titles(&detail["tasks"]), vec!["Paint fence"]);
}

#[tokio::test]
async fn test_task_on_missing_project_is_not_found() {
    let ctx = TestContext::new().await;
    let cookie = ctx.member_session("dave").await;

    let response = ctx
        .post_form("/projects/42/add_task", "title=Orphan", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(ctx.count("tasks").await, 0);

    let response = ctx.get("/projects/42/tasks", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_status_and_user_listings() {
    let ctx = TestContext::new().await;
    let alice = ctx.member_session("alice").await;
    let bob = ctx.member_session("bobby").await;

    ctx.post_form("/add", "task=Alice+one", Some(&alice)).await;
    ctx.post_form("/add", "task=Alice+two", Some(&alice)).await;
    ctx.post_form("/add", "task=Bob+one", Some(&bob)).await;
    ctx.post_form("/edit/2", "status=in+progress", Some(&alice))
        .await;

    let mine = view_data(ctx.get("/user/tasks", Some(&alice)).await, "user_tasks").await;
    assert_eq!(titles(&mine), vec!["Alice one", "Alice two"]);

    let in_progress = view_data(
        ctx.get("/tasks/status/in%20progress", Some(&bob)).await,
        "tasks",
    )
    .await;
    assert_eq!(titles(&in_progress), vec!["Alice two"]);

    let same = view_data(
        ctx.get("/tasks/status/in_progress", Some(&bob)).await,
        "tasks",
    )
    .await;
    assert_eq!(same, in_progress);

    let pending = view_data(ctx.get("/tasks/status/pending", Some(&bob)).await, "tasks").await;
    assert_eq!(titles(&pending), vec!["Alice one", "Bob one"]);

    let response = ctx.get("/tasks/status/done", Some(&bob)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
