//! TcpExecutor against the loopback fake

use crate::fake_server::{closed_port, text_result, FakeServer, Session};
use woodshop_bridge::{BridgeConfig, BridgeError, Executor, TcpExecutor, EVAL_TOOL};

#[test]
fn test_execute_sends_tool_call() {
    let server = FakeServer::start(vec![Session::Reply(text_result("done", false))], false);
    let mut executor = TcpExecutor::new(server.config());

    let outcome = executor.execute("puts 'hi'").unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.text, "done");
    drop(executor);

    let transcript = server.finish();
    let request = &transcript[0][0];
    assert_eq!(request["jsonrpc"], "2.0");
    assert_eq!(request["method"], "tools/call");
    assert_eq!(request["params"]["name"], EVAL_TOOL);
    assert_eq!(request["params"]["arguments"]["code"], "puts 'hi'");
    assert!(request["id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[test]
fn test_secret_is_sent_first() {
    let server = FakeServer::start(vec![Session::Reply(text_result("ok", false))], true);
    let config = BridgeConfig {
        auth_secret: "s3cret".to_string(),
        ..server.config()
    };
    let mut executor = TcpExecutor::new(config);
    executor.execute("1 + 1").unwrap();
    drop(executor);

    let transcript = server.finish();
    assert_eq!(transcript[0][0], serde_json::json!({"secret": "s3cret"}));
    assert_eq!(transcript[0][1]["method"], "tools/call");
}

#[test]
fn test_script_failure_is_an_outcome() {
    let server = FakeServer::start(vec![Session::Reply(text_result("NameError", true))], false);
    let mut executor = TcpExecutor::new(server.config());
    let outcome = executor.execute("bogus").unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.text, "NameError");
    drop(executor);
    server.finish();
}

#[test]
fn test_remote_error() {
    let server = FakeServer::start(vec![Session::Error("Tool not found".to_string())], false);
    let mut executor = TcpExecutor::new(server.config());
    let err = executor.execute("x").unwrap_err();
    assert!(matches!(err, BridgeError::Remote(ref m) if m == "Tool not found"));
    drop(executor);
    server.finish();
}

#[test]
fn test_reconnects_after_dropped_connection() {
    let server = FakeServer::start(
        vec![Session::Hangup, Session::Reply(text_result("second try", false))],
        false,
    );
    let mut executor = TcpExecutor::new(server.config());
    let outcome = executor.execute("x").unwrap();
    assert_eq!(outcome.text, "second try");
    drop(executor);

    let transcript = server.finish();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0][0]["id"], transcript[1][0]["id"]);
}

#[test]
fn test_gives_up_after_retries() {
    let server = FakeServer::start(vec![Session::Hangup, Session::Hangup], false);
    let config = BridgeConfig {
        max_retries: 1,
        ..server.config()
    };
    let mut executor = TcpExecutor::new(config);
    let err = executor.execute("x").unwrap_err();
    assert!(matches!(err, BridgeError::ConnectionLost { attempts: 2, .. }));
    assert!(err.is_unreachable());
    assert!(!executor.is_connected());
    server.finish();
}

#[test]
fn test_connection_refused() {
    let config = BridgeConfig {
        port: closed_port(),
        timeout_secs: 2.0,
        ..Default::default()
    };
    let mut executor = TcpExecutor::new(config);
    let err = executor.execute("x").unwrap_err();
    assert!(matches!(err, BridgeError::Connection { .. }));
}
