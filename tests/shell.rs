mod common;

use common::{MockBridge, Reply};
use rpc_form::cli::{run_shell, WriterView};
use rpc_form::RpcMethod;

async fn drive(bridge: &MockBridge, script: &str) -> String {
    let session = bridge.session();
    let view = WriterView::new(Vec::new());
    run_shell(&session, RpcMethod::ToolsList, script.as_bytes(), &view)
        .await
        .expect("shell runs to completion");
    String::from_utf8(view.into_inner()).unwrap()
}

#[tokio::test]
async fn shell_sends_selected_method_and_params() {
    let bridge = MockBridge::start(Reply::Echo).await;
    let output = drive(
        &bridge,
        "method tools/call\nparams {\"name\": \"airbnb_search\"}\nsend\nexit\n",
    )
    .await;

    assert!(output.contains("method set to tools/call"));
    assert!(output.contains("Sending..."));
    assert!(output.contains("\"airbnb_search\""));

    let received = bridge.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0]["method"], "tools/call");
}

#[tokio::test]
async fn shell_reports_bad_params_without_sending() {
    let bridge = MockBridge::start(Reply::Echo).await;
    let output = drive(&bridge, "params {broken\nsend\n").await;

    assert!(output.contains("Invalid JSON in params: "));
    assert!(!output.contains("Sending..."));
    assert!(bridge.received().is_empty());
}

#[tokio::test]
async fn shell_keeps_working_after_failure() {
    let bridge = MockBridge::start(Reply::Echo).await;
    let output = drive(&bridge, "params [1]\nsend\nparams\nsend\nshow\nexit\n").await;

    assert!(output.contains("Invalid JSON in params: expected a JSON object"));
    assert!(output.contains("method: tools/list\nparams: {}"));
    assert_eq!(bridge.received().len(), 1);
    assert_eq!(bridge.received()[0]["params"], serde_json::json!({}));
}

#[tokio::test]
async fn shell_rejects_unknown_commands_and_methods() {
    let bridge = MockBridge::start(Reply::Echo).await;
    let output = drive(&bridge, "frobnicate\nmethod tools/delete\nexit\n").await;

    assert!(output.contains("Unknown command: frobnicate"));
    assert!(output.contains("Unknown method: tools/delete"));
    assert!(bridge.received().is_empty());
}
