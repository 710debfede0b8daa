//! Drives the MCP server end to end against a mocked Slack Web API.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use slack_mcp::config::{ConnectionConfig, SlackConfig};
use slack_mcp::mcp::{McpServer, RequestHandler};
use slack_mcp::slack::{SlackApi, SlackClient};
use slack_mcp::tools::ArgumentMode;
use std::sync::Arc;
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn run_session(api: &MockServer, mode: ArgumentMode, calls: &[Value]) -> Vec<Value> {
    let slack = SlackConfig {
        bot_token: "xoxb-e2e".to_string(),
        api_base_url: api.uri(),
    };
    let client: Arc<dyn SlackApi> =
        Arc::new(SlackClient::new(&slack, &ConnectionConfig::default()).unwrap());
    let server = McpServer::new(RequestHandler::new(client, mode));

    let mut lines = vec![
        json!({"jsonrpc": "2.0", "id": 0, "method": "initialize", "params": {"protocolVersion": "2025-06-18"}}),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
    ];
    lines.extend(calls.iter().enumerate().map(|(i, call)| {
        json!({"jsonrpc": "2.0", "id": i + 1, "method": "tools/call", "params": call})
    }));
    let input: String = lines.iter().map(|line| format!("{line}\n")).collect();

    let mut output = Vec::new();
    server.serve(input.as_bytes(), &mut output).await.unwrap();

    let mut responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses[0]["result"]["protocolVersion"], "2025-06-18");
    responses.remove(0);
    responses
}

fn text(response: &Value) -> &str {
    response["result"]["content"][0]["text"].as_str().unwrap()
}

#[tokio::test]
async fn test_post_and_reply_round_trip() {
    let api = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat.postMessage"))
        .and(body_string("channel=C1&text=hi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "channel": "C1", "ts": "123.456"})))
        .expect(1)
        .mount(&api)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat.postMessage"))
        .and(body_string("channel=C1&text=thanks&thread_ts=123.456"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "channel": "C1", "ts": "123.789"})))
        .expect(1)
        .mount(&api)
        .await;

    let responses = run_session(
        &api,
        ArgumentMode::Strict,
        &[
            json!({"name": "post_message", "arguments": {"channel": "C1", "text": "hi"}}),
            json!({"name": "reply_to_thread", "arguments": {"channel": "C1", "timestamp": "123.456", "text": "thanks"}}),
        ],
    )
    .await;

    assert_eq!(text(&responses[0]), r#"{"channel":"C1","timestamp":"123.456"}"#);
    assert_eq!(text(&responses[1]), r#"{"channel":"C1","timestamp":"123.789"}"#);
}

#[tokio::test]
async fn test_slack_failure_becomes_tool_error() {
    let api = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/reactions.add"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": false, "error": "invalid_auth"})))
        .mount(&api)
        .await;

    let responses = run_session(
        &api,
        ArgumentMode::Strict,
        &[json!({"name": "add_reaction", "arguments": {"channel": "C1", "timestamp": "1.0", "reaction": "eyes"}})],
    )
    .await;

    assert_eq!(responses[0]["error"]["code"], -32603);
    assert_eq!(
        responses[0]["error"]["message"],
        "Slack API error: reactions.add failed: invalid_auth"
    );
    assert!(responses[0].get("result").is_none());
}

#[tokio::test]
async fn test_lenient_mode_forwards_empty_channel() {
    let api = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/conversations.history"))
        .and(body_string("channel="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": false, "error": "channel_not_found"})))
        .expect(1)
        .mount(&api)
        .await;

    let responses = run_session(
        &api,
        ArgumentMode::Lenient,
        &[json!({"name": "get_channel_history", "arguments": {}})],
    )
    .await;

    assert!(responses[0]["error"]["message"].as_str().unwrap().contains("channel_not_found"));
}

#[tokio::test]
async fn test_strict_mode_never_reaches_slack() {
    let api = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(0)
        .mount(&api)
        .await;

    let responses = run_session(
        &api,
        ArgumentMode::Strict,
        &[json!({"name": "get_thread_replies", "arguments": {"channel": "C1"}})],
    )
    .await;

    assert_eq!(responses[0]["error"]["code"], -32602);
    assert_eq!(
        responses[0]["error"]["message"],
        "Invalid parameter: missing required argument 'timestamp'"
    );
}

#[tokio::test]
async fn test_get_users_relays_all_pages_as_text() {
    let api = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users.list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "members": [{"id": "U1", "name": "alice", "is_bot": false}],
            "response_metadata": {"next_cursor": ""},
        })))
        .mount(&api)
        .await;

    let responses = run_session(&api, ArgumentMode::Strict, &[json!({"name": "get_users"})]).await;

    let users: Value = serde_json::from_str(text(&responses[0])).unwrap();
    assert_eq!(users, json!([{"id": "U1", "name": "alice", "is_bot": false}]));
}
