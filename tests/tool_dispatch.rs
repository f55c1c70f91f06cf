//! End-to-end tool invocations against a mocked GitLab API.

use gitlab_mcp::config::Config;
use gitlab_mcp::context::Context;
use gitlab_mcp::mcp::McpServer;
use pretty_assertions::assert_eq;
use rmcp::model::{CallToolResult, JsonObject};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "glpat-test-token";

fn server_for(mock: &MockServer) -> McpServer {
    let config = Config {
        token: TOKEN.to_string(),
        url: format!("{}/api/v4", mock.uri()),
        default_project_id: None,
        timeout_secs: Some(5),
    };
    McpServer::new(Context::from_config(config).expect("context")).expect("server")
}

fn args(value: Value) -> Option<JsonObject> {
    match value {
        Value::Object(map) => Some(map),
        other => panic!("arguments must be an object, got {other}"),
    }
}

/// (is_error, text) of a tool result.
fn unpack(result: &CallToolResult) -> (bool, String) {
    let value = serde_json::to_value(result).unwrap();
    let is_error = value["isError"].as_bool().unwrap_or(false);
    let text = value["content"][0]["text"].as_str().unwrap().to_string();
    (is_error, text)
}

fn ok_json(result: &CallToolResult) -> Value {
    let (is_error, text) = unpack(result);
    assert!(!is_error, "unexpected error: {text}");
    serde_json::from_str(&text).unwrap()
}

#[tokio::test]
async fn test_list_projects_sends_membership_query_and_token() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects"))
        .and(query_param("membership", "true"))
        .and(query_param("simple", "true"))
        .and(header("Authorization", "Bearer glpat-test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1 }])))
        .expect(1)
        .mount(&mock)
        .await;

    let result = server_for(&mock).invoke("list_projects", None).await;
    assert_eq!(ok_json(&result), json!([{ "id": 1 }]));
}

#[tokio::test]
async fn test_create_branch_defaults_ref_to_main() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/projects/42/repository/branches"))
        .and(body_json(json!({ "branch": "feature", "ref": "main" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "name": "feature" })))
        .expect(1)
        .mount(&mock)
        .await;

    let result = server_for(&mock)
        .invoke(
            "create_branch",
            args(json!({ "projectId": "42", "branchName": "feature" })),
        )
        .await;
    assert_eq!(ok_json(&result), json!({ "name": "feature" }));
}

#[tokio::test]
async fn test_create_branch_passes_explicit_ref() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/projects/42/repository/branches"))
        .and(body_json(json!({ "branch": "feature", "ref": "develop" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "name": "feature" })))
        .expect(1)
        .mount(&mock)
        .await;

    let result = server_for(&mock)
        .invoke(
            "create_branch",
            args(json!({ "projectId": "42", "branchName": "feature", "ref": "develop" })),
        )
        .await;
    assert!(!unpack(&result).0);
}

#[tokio::test]
async fn test_get_file_returns_decoded_text() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/repository/files/README.md"))
        .and(query_param("ref", "main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "file_name": "README.md",
            "file_path": "README.md",
            "size": 8,
            "encoding": "base64",
            "content": "IyBIZWxsbwo=",
            "ref": "main",
            "blob_id": "abc",
            "last_commit_id": "def"
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let result = server_for(&mock)
        .invoke(
            "get_file",
            args(json!({ "projectId": "42", "filePath": "README.md" })),
        )
        .await;

    let file = ok_json(&result);
    assert_eq!(file["content"], "# Hello\n");
    assert_eq!(file["file_name"], "README.md");
    assert_eq!(file["last_commit_id"], "def");
}

#[tokio::test]
async fn test_create_file_encodes_content_for_nested_path() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/projects/42/repository/files/docs%2Fguide.md"))
        .and(body_json(json!({
            "branch": "main",
            "content": "aGVsbG8=",
            "encoding": "base64",
            "commit_message": "Add guide"
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "file_path": "docs/guide.md", "branch": "main" })),
        )
        .expect(1)
        .mount(&mock)
        .await;

    let result = server_for(&mock)
        .invoke(
            "create_file",
            args(json!({
                "projectId": "42",
                "filePath": "docs/guide.md",
                "content": "hello",
                "commitMessage": "Add guide"
            })),
        )
        .await;
    assert_eq!(ok_json(&result)["file_path"], "docs/guide.md");
}

#[tokio::test]
async fn test_delete_file_sends_body_with_delete() {
    let mock = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v4/projects/42/repository/files/old.txt"))
        .and(body_json(json!({ "branch": "cleanup", "commit_message": "Remove old file" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock)
        .await;

    let result = server_for(&mock)
        .invoke(
            "delete_file",
            args(json!({
                "projectId": "42",
                "filePath": "old.txt",
                "commitMessage": "Remove old file",
                "branch": "cleanup"
            })),
        )
        .await;
    assert_eq!(ok_json(&result), Value::Null);
}

#[tokio::test]
async fn test_project_path_is_percent_encoded() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/group%2Fsub-group%2Fproject/repository/branches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "name": "main" }])))
        .expect(1)
        .mount(&mock)
        .await;

    let result = server_for(&mock)
        .invoke(
            "list_branches",
            args(json!({ "projectId": "group/sub-group/project" })),
        )
        .await;
    assert_eq!(ok_json(&result), json!([{ "name": "main" }]));

    let requests = mock.received_requests().await.unwrap();
    let segment = requests[0].url.path_segments().unwrap().nth(2).unwrap().to_string();
    assert_eq!(segment, "group%2Fsub-group%2Fproject");
    assert_eq!(segment.replace("%2F", "/"), "group/sub-group/project");
}

#[tokio::test]
async fn test_branch_name_is_percent_encoded_on_delete() {
    let mock = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v4/projects/42/repository/branches/feature%2Flogin"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock)
        .await;

    let result = server_for(&mock)
        .invoke(
            "delete_branch",
            args(json!({ "projectId": "42", "branchName": "feature/login" })),
        )
        .await;
    assert!(!unpack(&result).0);
}

#[tokio::test]
async fn test_resolve_discussion_defaults_to_true() {
    let mock = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v4/projects/42/merge_requests/7/discussions/d1"))
        .and(body_json(json!({ "resolved": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "d1" })))
        .expect(1)
        .mount(&mock)
        .await;

    let result = server_for(&mock)
        .invoke(
            "resolve_discussion",
            args(json!({ "projectId": "42", "mergeRequestIid": 7, "discussionId": "d1" })),
        )
        .await;
    assert!(!unpack(&result).0);
}

#[tokio::test]
async fn test_resolve_discussion_keeps_explicit_false() {
    let mock = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v4/projects/42/merge_requests/7/discussions/d1"))
        .and(body_json(json!({ "resolved": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "d1" })))
        .expect(1)
        .mount(&mock)
        .await;

    let result = server_for(&mock)
        .invoke(
            "resolve_discussion",
            args(json!({
                "projectId": "42",
                "mergeRequestIid": 7,
                "discussionId": "d1",
                "resolved": false
            })),
        )
        .await;
    assert!(!unpack(&result).0);
}

#[tokio::test]
async fn test_create_discussion_without_position() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/projects/42/merge_requests/7/discussions"))
        .and(body_json(json!({ "body": "Looks good" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "d2" })))
        .expect(1)
        .mount(&mock)
        .await;

    let result = server_for(&mock)
        .invoke(
            "create_merge_request_discussion",
            args(json!({ "projectId": "42", "mergeRequestIid": 7, "body": "Looks good" })),
        )
        .await;
    assert_eq!(ok_json(&result), json!({ "id": "d2" }));
}

#[tokio::test]
async fn test_create_discussion_with_position() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/projects/42/merge_requests/7/discussions"))
        .and(body_json(json!({
            "body": "Off by one?",
            "position": {
                "base_sha": "aaa",
                "start_sha": "bbb",
                "head_sha": "ccc",
                "old_path": "src/lib.rs",
                "new_path": "src/lib.rs",
                "position_type": "text",
                "new_line": 18
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "d3" })))
        .expect(1)
        .mount(&mock)
        .await;

    let result = server_for(&mock)
        .invoke(
            "create_merge_request_discussion",
            args(json!({
                "projectId": "42",
                "mergeRequestIid": 7,
                "body": "Off by one?",
                "position": {
                    "base_sha": "aaa",
                    "start_sha": "bbb",
                    "head_sha": "ccc",
                    "old_path": "src/lib.rs",
                    "new_path": "src/lib.rs",
                    "position_type": "text",
                    "new_line": 18
                }
            })),
        )
        .await;
    assert!(!unpack(&result).0);
}

#[tokio::test]
async fn test_update_and_delete_note() {
    let mock = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v4/projects/42/merge_requests/7/discussions/d1/notes/99"))
        .and(body_json(json!({ "body": "edited" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 99 })))
        .expect(1)
        .mount(&mock)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v4/projects/42/merge_requests/7/discussions/d1/notes/99"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_for(&mock);
    let base = json!({
        "projectId": "42",
        "mergeRequestIid": 7,
        "discussionId": "d1",
        "noteId": 99
    });

    let mut update = base.clone();
    update["body"] = json!("edited");
    let result = server.invoke("update_discussion_note", args(update)).await;
    assert_eq!(ok_json(&result), json!({ "id": 99 }));

    let result = server.invoke("delete_discussion_note", args(base)).await;
    assert!(!unpack(&result).0);
}

#[tokio::test]
async fn test_list_merge_requests_defaults_state() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/merge_requests"))
        .and(query_param("state", "opened"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock)
        .await;

    let result = server_for(&mock)
        .invoke("list_merge_requests", args(json!({ "projectId": "42" })))
        .await;
    assert_eq!(ok_json(&result), json!([]));
}

#[tokio::test]
async fn test_create_merge_request_defaults() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/projects/42/merge_requests"))
        .and(body_json(json!({
            "source_branch": "feature",
            "target_branch": "main",
            "title": "Add feature",
            "description": ""
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "iid": 3 })))
        .expect(1)
        .mount(&mock)
        .await;

    let result = server_for(&mock)
        .invoke(
            "create_merge_request",
            args(json!({ "projectId": "42", "sourceBranch": "feature", "title": "Add feature" })),
        )
        .await;
    assert_eq!(ok_json(&result), json!({ "iid": 3 }));
}

#[tokio::test]
async fn test_merge_without_message_sends_empty_object() {
    let mock = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v4/projects/42/merge_requests/3/merge"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "state": "merged" })))
        .expect(1)
        .mount(&mock)
        .await;

    let result = server_for(&mock)
        .invoke(
            "merge_merge_request",
            args(json!({ "projectId": "42", "mergeRequestIid": 3 })),
        )
        .await;
    assert_eq!(ok_json(&result)["state"], "merged");
}

#[tokio::test]
async fn test_update_merge_request_sends_only_given_fields() {
    let mock = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v4/projects/42/merge_requests/3"))
        .and(body_json(json!({ "title": "Renamed", "labels": "bug,ui" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "title": "Renamed" })))
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_for(&mock);
    let result = server
        .invoke(
            "update_merge_request",
            args(json!({
                "projectId": "42",
                "mergeRequestIid": 3,
                "title": "Renamed",
                "labels": ["bug", "ui"]
            })),
        )
        .await;
    assert_eq!(ok_json(&result)["title"], "Renamed");

    let (is_error, text) = unpack(
        &server
            .invoke(
                "update_merge_request",
                args(json!({ "projectId": "42", "mergeRequestIid": 3 })),
            )
            .await,
    );
    assert!(is_error);
    assert!(text.contains("at least one field"));
}

#[tokio::test]
async fn test_list_commits_with_and_without_branch() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/repository/commits"))
        .and(query_param("ref_name", "develop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "c1" }])))
        .expect(1)
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/repository/commits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "c0" }])))
        .mount(&mock)
        .await;

    let server = server_for(&mock);
    let result = server
        .invoke(
            "list_commits",
            args(json!({ "projectId": "42", "branch": "develop" })),
        )
        .await;
    assert_eq!(ok_json(&result), json!([{ "id": "c1" }]));

    let result = server
        .invoke("list_commits", args(json!({ "projectId": "42" })))
        .await;
    assert_eq!(ok_json(&result), json!([{ "id": "c0" }]));
}

#[tokio::test]
async fn test_create_commit_passes_actions_through() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/projects/42/repository/commits"))
        .and(body_json(json!({
            "branch": "main",
            "commit_message": "Restructure",
            "actions": [
                { "action": "create", "file_path": "a.txt", "content": "A" },
                { "action": "delete", "file_path": "b.txt" }
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "c9" })))
        .expect(1)
        .mount(&mock)
        .await;

    let result = server_for(&mock)
        .invoke(
            "create_commit",
            args(json!({
                "projectId": "42",
                "branch": "main",
                "commitMessage": "Restructure",
                "actions": [
                    { "action": "create", "file_path": "a.txt", "content": "A" },
                    { "action": "delete", "file_path": "b.txt" }
                ]
            })),
        )
        .await;
    assert_eq!(ok_json(&result), json!({ "id": "c9" }));
}

#[tokio::test]
async fn test_issues() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/issues"))
        .and(query_param("state", "closed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v4/projects/42/issues"))
        .and(body_json(json!({ "title": "Crash on start", "description": "", "labels": [] })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "iid": 12 })))
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_for(&mock);
    let result = server
        .invoke(
            "list_issues",
            args(json!({ "projectId": "42", "state": "closed" })),
        )
        .await;
    assert_eq!(ok_json(&result), json!([]));

    let result = server
        .invoke(
            "create_issue",
            args(json!({ "projectId": "42", "title": "Crash on start" })),
        )
        .await;
    assert_eq!(ok_json(&result), json!({ "iid": 12 }));
}

#[tokio::test]
async fn test_backend_404_is_error_flagged_and_server_keeps_serving() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/999"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "404 Project Not Found" })),
        )
        .expect(1)
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 42 })))
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_for(&mock);

    let (is_error, text) = unpack(
        &server
            .invoke("get_project", args(json!({ "projectId": "999" })))
            .await,
    );
    assert!(is_error);
    assert!(text.starts_with("Error: "));
    assert!(text.contains("404"));
    assert!(text.contains("404 Project Not Found"));

    let result = server
        .invoke("get_project", args(json!({ "projectId": "42" })))
        .await;
    assert_eq!(ok_json(&result), json!({ "id": 42 }));
}

#[tokio::test]
async fn test_invalid_arguments_never_reach_backend() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock)
        .await;

    let (is_error, text) = unpack(
        &server_for(&mock)
            .invoke("create_branch", args(json!({ "projectId": "42" })))
            .await,
    );
    assert!(is_error);
    assert!(text.contains("branchName"));
}

#[tokio::test]
async fn test_unknown_tool_names_the_tool() {
    let mock = MockServer::start().await;
    let (is_error, text) = unpack(
        &server_for(&mock)
            .invoke("delete_everything", args(json!({})))
            .await,
    );
    assert!(is_error);
    assert_eq!(text, "Error: Unknown tool: delete_everything");
}

#[tokio::test]
async fn test_discussion_reads_and_reply() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/merge_requests/7/discussions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "d1" }])))
        .expect(1)
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/merge_requests/7/discussions/d1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "d1", "notes": [] })))
        .expect(1)
        .mount(&mock)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v4/projects/42/merge_requests/7/discussions/d1/notes"))
        .and(body_json(json!({ "body": "Fixed in the next push" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 100 })))
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_for(&mock);
    let result = server
        .invoke(
            "list_merge_request_discussions",
            args(json!({ "projectId": "42", "mergeRequestIid": 7 })),
        )
        .await;
    assert_eq!(ok_json(&result), json!([{ "id": "d1" }]));

    let result = server
        .invoke(
            "get_merge_request_discussion",
            args(json!({ "projectId": "42", "mergeRequestIid": 7, "discussionId": "d1" })),
        )
        .await;
    assert_eq!(ok_json(&result)["id"], "d1");

    let result = server
        .invoke(
            "add_note_to_discussion",
            args(json!({
                "projectId": "42",
                "mergeRequestIid": 7,
                "discussionId": "d1",
                "body": "Fixed in the next push"
            })),
        )
        .await;
    assert_eq!(ok_json(&result), json!({ "id": 100 }));
}

#[tokio::test]
async fn test_get_merge_request() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/group%2Fapp/merge_requests/3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "iid": 3, "state": "opened" })),
        )
        .expect(1)
        .mount(&mock)
        .await;

    let result = server_for(&mock)
        .invoke(
            "get_merge_request",
            args(json!({ "projectId": "group/app", "mergeRequestIid": 3 })),
        )
        .await;
    assert_eq!(ok_json(&result)["state"], "opened");
}

#[tokio::test]
async fn test_update_file_uses_put() {
    let mock = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v4/projects/42/repository/files/README.md"))
        .and(body_json(json!({
            "branch": "docs",
            "content": "IyBIZWxsbwo=",
            "encoding": "base64",
            "commit_message": "Update readme"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "file_path": "README.md" })))
        .expect(1)
        .mount(&mock)
        .await;

    let result = server_for(&mock)
        .invoke(
            "update_file",
            args(json!({
                "projectId": "42",
                "filePath": "README.md",
                "content": "# Hello\n",
                "commitMessage": "Update readme",
                "branch": "docs"
            })),
        )
        .await;
    assert_eq!(ok_json(&result)["file_path"], "README.md");
}

#[tokio::test]
async fn test_null_and_empty_ref_fall_back_to_main() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/projects/42/repository/branches"))
        .and(body_json(json!({ "branch": "feature", "ref": "main" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "name": "feature" })))
        .expect(2)
        .mount(&mock)
        .await;

    let server = server_for(&mock);
    for git_ref in [Value::Null, json!("")] {
        let result = server
            .invoke(
                "create_branch",
                args(json!({ "projectId": "42", "branchName": "feature", "ref": git_ref })),
            )
            .await;
        assert_eq!(ok_json(&result), json!({ "name": "feature" }));
    }
}

#[tokio::test]
async fn test_null_and_empty_state_fall_back_to_opened() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/merge_requests"))
        .and(query_param("state", "opened"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&mock)
        .await;

    let server = server_for(&mock);
    for state in [Value::Null, json!("")] {
        let result = server
            .invoke(
                "list_merge_requests",
                args(json!({ "projectId": "42", "state": state })),
            )
            .await;
        assert_eq!(ok_json(&result), json!([]));
    }
}

#[tokio::test]
async fn test_null_resolved_falls_back_to_true() {
    let mock = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v4/projects/42/merge_requests/7/discussions/d1"))
        .and(body_json(json!({ "resolved": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "d1" })))
        .expect(1)
        .mount(&mock)
        .await;

    let result = server_for(&mock)
        .invoke(
            "resolve_discussion",
            args(json!({
                "projectId": "42",
                "mergeRequestIid": 7,
                "discussionId": "d1",
                "resolved": null
            })),
        )
        .await;
    assert!(!unpack(&result).0);
}

#[tokio::test]
async fn test_file_path_control_characters_reach_backend_escaped() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/repository/files/a%09b.txt"))
        .and(query_param("ref", "main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": "aGk=" })))
        .expect(1)
        .mount(&mock)
        .await;

    let result = server_for(&mock)
        .invoke(
            "get_file",
            args(json!({ "projectId": "42", "filePath": "a\tb.txt" })),
        )
        .await;
    assert_eq!(ok_json(&result), json!({ "content": "hi" }));
}

#[tokio::test]
async fn test_dot_dot_file_path_is_rejected_without_request() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&mock)
        .await;

    let (is_error, text) = unpack(
        &server_for(&mock)
            .invoke(
                "get_file",
                args(json!({ "projectId": "42", "filePath": ".." })),
            )
            .await,
    );
    assert!(is_error);
    assert!(text.contains("'..'"));
}
