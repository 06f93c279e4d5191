//! Tool operations with scripted executors

use crate::fake_server::{closed_port, text_result, FakeServer, Session};
use woodshop_bridge::{
    build_project, BridgeConfig, BridgeError, BridgeResult, ExecutionOutcome, Executor,
    TcpExecutor, CONNECTION_HINT,
};
use woodshop_templates::TemplateRequest;

/// Records scripts and replays a fixed answer.
struct ScriptedExecutor {
    answer: fn() -> BridgeResult<ExecutionOutcome>,
    scripts: Vec<String>,
}

impl ScriptedExecutor {
    fn new(answer: fn() -> BridgeResult<ExecutionOutcome>) -> Self {
        Self {
            answer,
            scripts: Vec::new(),
        }
    }
}

impl Executor for ScriptedExecutor {
    fn execute(&mut self, script: &str) -> BridgeResult<ExecutionOutcome> {
        self.scripts.push(script.to_string());
        (self.answer)()
    }
}

#[test]
fn test_successful_build() {
    let mut executor = ScriptedExecutor::new(|| Ok(ExecutionOutcome::ok("Created Box")));
    let request = TemplateRequest::new("box").with_dimensions(200.0, 100.0, 150.0);
    let response = build_project(&request, &mut executor).unwrap();

    assert!(response.success);
    assert_eq!(response.result.as_deref(), Some("Created Box"));
    assert_eq!(response.template.as_deref(), Some("box"));
    let dims = response.dimensions.unwrap();
    assert_eq!((dims.width, dims.height, dims.depth), (200.0, 100.0, 150.0));
    assert!(!response.cut_list.unwrap().is_empty());
    assert!(response.build_script.is_none());
    assert_eq!(executor.scripts.len(), 1);
    assert!(executor.scripts[0].contains("Box 200x100x150"));
}

#[test]
fn test_rejection_never_reaches_executor() {
    let mut executor = ScriptedExecutor::new(|| Ok(ExecutionOutcome::ok("unused")));
    let request = TemplateRequest::new("bookshelf").with_dimensions(600.0, 100.0, 300.0);
    let response = build_project(&request, &mut executor).unwrap();

    assert!(!response.success);
    assert!(response.error.unwrap().contains("Minimum height required"));
    assert!(executor.scripts.is_empty());
}

#[test]
fn test_unknown_template_is_rejected() {
    let mut executor = ScriptedExecutor::new(|| Ok(ExecutionOutcome::ok("unused")));
    let response = build_project(&TemplateRequest::new("canoe"), &mut executor).unwrap();
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["success"], false);
    assert!(value["error"].as_str().unwrap().contains("canoe"));
    assert!(executor.scripts.is_empty());
}

#[test]
fn test_script_failure_returns_script() {
    let mut executor = ScriptedExecutor::new(|| Ok(ExecutionOutcome::failed("undefined method")));
    let response = build_project(&TemplateRequest::new("tray"), &mut executor).unwrap();

    assert!(!response.success);
    assert_eq!(
        response.error.as_deref(),
        Some("Modeling application error: undefined method")
    );
    assert_eq!(response.build_script.as_deref(), Some(executor.scripts[0].as_str()));
    assert!(response.hint.is_none());
}

#[test]
fn test_timeout_is_an_execution_failure() {
    let mut executor = ScriptedExecutor::new(|| Err(BridgeError::Timeout { secs: 15.0 }));
    let response = build_project(&TemplateRequest::new("tray"), &mut executor).unwrap();
    assert!(!response.success);
    assert!(response.error.unwrap().starts_with("Modeling application error:"));
    assert!(response.build_script.is_some());
}

#[test]
fn test_unreachable_application_gets_hint() {
    let mut executor = TcpExecutor::new(BridgeConfig {
        port: closed_port(),
        timeout_secs: 2.0,
        ..Default::default()
    });
    let response = build_project(&TemplateRequest::new("cutting_board"), &mut executor).unwrap();

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["success"], false);
    assert_eq!(value["hint"], CONNECTION_HINT);
    assert!(value.get("cut_list").is_none());
}

#[test]
fn test_build_over_tcp() {
    let server = FakeServer::start(
        vec![Session::Reply(text_result("Created Serving Tray", false))],
        false,
    );
    let mut executor = TcpExecutor::new(server.config());
    let response = build_project(&TemplateRequest::new("tray"), &mut executor).unwrap();
    assert!(response.success);
    assert_eq!(response.result.as_deref(), Some("Created Serving Tray"));
    drop(executor);

    let transcript = server.finish();
    let code = transcript[0][0]["params"]["arguments"]["code"].as_str().unwrap();
    assert!(code.contains("start_operation"));
}
