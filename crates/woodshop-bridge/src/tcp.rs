//! TCP executor
//!
//! Talks newline-delimited JSON-RPC 2.0 to the modeling application's bridge
//! extension over a blocking socket:
//!
//! - connect, then send `{"secret": ...}` when a shared secret is configured
//! - send `tools/call` for `eval_ruby` with the script as `arguments.code`
//! - read chunks until the accumulated bytes parse as one JSON document
//! - on I/O failure drop the socket, reconnect and resend up to
//!   `max_retries` more times

use crate::config::BridgeConfig;
use crate::error::{BridgeError, BridgeResult};
use crate::executor::{ExecutionOutcome, Executor};
use serde_json::{json, Value};
use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use uuid::Uuid;

/// Remote tool that evaluates a build script.
pub const EVAL_TOOL: &str = "eval_ruby";

/// Message used when a tool result carries no content.
pub const NO_RESPONSE: &str = "No response from modeling application";

/// Encode one JSON-RPC `tools/call` request line.
pub fn encode_tool_call(name: &str, arguments: Value, id: &str) -> BridgeResult<Vec<u8>> {
    let request = json!({
        "jsonrpc": "2.0",
        "method": "tools/call",
        "params": {
            "name": name,
            "arguments": arguments,
        },
        "id": id,
    });
    let mut line = serde_json::to_vec(&request)?;
    line.push(b'\n');
    Ok(line)
}

/// Read until the bytes received so far form a complete JSON document.
///
/// A read timeout with nothing received is [`BridgeError::Timeout`]; the peer
/// closing before any byte arrives is an I/O error so the caller can retry.
pub fn read_response<R: Read>(
    reader: &mut R,
    buffer_size: usize,
    timeout_secs: f64,
) -> BridgeResult<Value> {
    let mut data = Vec::new();
    let mut chunk = vec![0u8; buffer_size.max(1)];

    loop {
        match reader.read(&mut chunk) {
            Ok(0) => {
                if data.is_empty() {
                    return Err(BridgeError::Io(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "connection closed before a response arrived",
                    )));
                }
                break;
            }
            Ok(n) => {
                data.extend_from_slice(&chunk[..n]);
                if let Ok(value) = serde_json::from_slice::<Value>(&data) {
                    return Ok(value);
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
                ) =>
            {
                if data.is_empty() {
                    return Err(BridgeError::Timeout { secs: timeout_secs });
                }
                break;
            }
            Err(e) => return Err(BridgeError::Io(e)),
        }
    }

    serde_json::from_slice(&data)
        .map_err(|e| BridgeError::InvalidResponse(format!("incomplete JSON: {}", e)))
}

/// Split a JSON-RPC response into its `result`, or the remote error.
pub fn into_result(response: Value) -> BridgeResult<Value> {
    if let Some(error) = response.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(BridgeError::Remote(message));
    }
    Ok(response.get("result").cloned().unwrap_or_else(|| json!({})))
}

/// Read the text and error flag out of a tool result.
pub fn parse_tool_response(result: &Value) -> ExecutionOutcome {
    let first = result
        .get("content")
        .and_then(Value::as_array)
        .and_then(|content| content.first());

    match first {
        Some(item) => {
            let text = item.get("text").and_then(Value::as_str).unwrap_or_default();
            let is_error = result
                .get("isError")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            ExecutionOutcome {
                success: !is_error,
                text: text.to_string(),
            }
        }
        None => ExecutionOutcome::failed(NO_RESPONSE),
    }
}

/// Blocking TCP connection to the modeling application.
#[derive(Debug)]
pub struct TcpExecutor {
    config: BridgeConfig,
    stream: Option<TcpStream>,
}

impl TcpExecutor {
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            stream: None,
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Open the socket if it is not already open.
    pub fn connect(&mut self) -> BridgeResult<()> {
        if self.stream.is_some() {
            return Ok(());
        }

        let address = self.config.address();
        let unreachable = |reason: String| BridgeError::Connection {
            addr: address.clone(),
            reason,
        };

        let addrs: Vec<_> = address
            .to_socket_addrs()
            .map_err(|e| unreachable(e.to_string()))?
            .collect();
        let timeout = self.config.timeout();

        let mut last_error = format!("no addresses resolved for {}", address);
        let mut stream = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, timeout) {
                Ok(s) => {
                    stream = Some(s);
                    break;
                }
                Err(e) => last_error = e.to_string(),
            }
        }
        let mut stream = stream.ok_or_else(|| unreachable(last_error))?;

        stream.set_read_timeout(Some(timeout))?;
        stream.set_write_timeout(Some(timeout))?;
        stream.set_nodelay(true)?;
        tracing::info!("Connected to modeling application at {}", address);

        if !self.config.auth_secret.is_empty() {
            let mut line = serde_json::to_vec(&json!({ "secret": self.config.auth_secret }))?;
            line.push(b'\n');
            stream.write_all(&line)?;
            stream.flush()?;
            tracing::debug!("Sent bridge authentication");
        }

        self.stream = Some(stream);
        Ok(())
    }

    pub fn disconnect(&mut self) {
        if let Some(stream) = self.stream.take() {
            if let Err(e) = stream.shutdown(Shutdown::Both) {
                tracing::debug!("Error closing bridge socket: {}", e);
            }
            tracing::info!("Disconnected from modeling application");
        }
    }

    /// Call a remote tool and return its `result` object.
    pub fn call_tool(&mut self, name: &str, arguments: Value) -> BridgeResult<Value> {
        self.connect()?;

        let id = Uuid::new_v4().to_string();
        let line = encode_tool_call(name, arguments, &id)?;
        tracing::debug!("Calling tool {} (id {})", name, id);

        let attempts = self.config.max_retries + 1;
        let mut last_error = String::new();
        for attempt in 1..=attempts {
            match self.round_trip(&line) {
                Ok(response) => return into_result(response),
                Err(BridgeError::Io(e)) => {
                    tracing::warn!(
                        "Connection error on attempt {}/{}: {}",
                        attempt,
                        attempts,
                        e
                    );
                    last_error = e.to_string();
                    self.disconnect();
                    if attempt < attempts {
                        self.connect()?;
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Err(BridgeError::ConnectionLost {
            attempts,
            reason: last_error,
        })
    }

    fn round_trip(&mut self, line: &[u8]) -> BridgeResult<Value> {
        let buffer_size = self.config.buffer_size;
        let timeout_secs = self.config.timeout_secs;
        let stream = self.stream.as_mut().ok_or_else(|| {
            BridgeError::Io(io::Error::new(io::ErrorKind::NotConnected, "not connected"))
        })?;
        stream.write_all(line)?;
        stream.flush()?;
        read_response(stream, buffer_size, timeout_secs)
    }
}

impl Executor for TcpExecutor {
    fn execute(&mut self, script: &str) -> BridgeResult<ExecutionOutcome> {
        let result = self.call_tool(EVAL_TOOL, json!({ "code": script }))?;
        Ok(parse_tool_response(&result))
    }
}

impl Drop for TcpExecutor {
    fn drop(&mut self) {
        self.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Hands out one fixed chunk per read.
    struct Chunked(Vec<Vec<u8>>);

    impl Read for Chunked {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() {
                return Err(io::Error::new(io::ErrorKind::WouldBlock, "no data"));
            }
            let chunk = self.0.remove(0);
            buf[..chunk.len()].copy_from_slice(&chunk);
            Ok(chunk.len())
        }
    }

    #[test]
    fn test_encode_tool_call() {
        let line = encode_tool_call("eval_ruby", json!({"code": "puts 1"}), "abc").unwrap();
        assert_eq!(line.last(), Some(&b'\n'));
        let value: Value = serde_json::from_slice(&line).unwrap();
        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["method"], "tools/call");
        assert_eq!(value["params"]["name"], "eval_ruby");
        assert_eq!(value["params"]["arguments"]["code"], "puts 1");
        assert_eq!(value["id"], "abc");
    }

    #[test]
    fn test_read_response_across_chunks() {
        let mut reader = Chunked(vec![
            br#"{"jsonrpc":"2.0","res"#.to_vec(),
            br#"ult":{"ok":true},"id":"1"}"#.to_vec(),
            b"\n".to_vec(),
        ]);
        let value = read_response(&mut reader, 1024, 1.0).unwrap();
        assert_eq!(value["result"]["ok"], true);
    }

    #[test]
    fn test_read_response_timeout_and_eof() {
        let mut reader = Chunked(Vec::new());
        assert!(matches!(
            read_response(&mut reader, 1024, 2.5),
            Err(BridgeError::Timeout { secs }) if secs == 2.5
        ));

        let mut reader = Cursor::new(Vec::new());
        assert!(matches!(
            read_response(&mut reader, 1024, 1.0),
            Err(BridgeError::Io(_))
        ));
    }

    #[test]
    fn test_read_response_truncated() {
        let mut reader = Cursor::new(br#"{"result": {"#.to_vec());
        assert!(matches!(
            read_response(&mut reader, 1024, 1.0),
            Err(BridgeError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_into_result_maps_remote_error() {
        let err = into_result(json!({"error": {"code": -32000, "message": "boom"}})).unwrap_err();
        assert!(matches!(err, BridgeError::Remote(ref m) if m == "boom"));

        let ok = into_result(json!({"result": {"content": []}})).unwrap();
        assert_eq!(ok, json!({"content": []}));
    }

    #[test]
    fn test_parse_tool_response() {
        let outcome = parse_tool_response(&json!({
            "content": [{"type": "text", "text": "Created Box"}],
            "isError": false
        }));
        assert_eq!(outcome, ExecutionOutcome::ok("Created Box"));

        let outcome = parse_tool_response(&json!({
            "content": [{"type": "text", "text": "NameError"}],
            "isError": true
        }));
        assert_eq!(outcome, ExecutionOutcome::failed("NameError"));

        let outcome = parse_tool_response(&json!({}));
        assert_eq!(outcome, ExecutionOutcome::failed(NO_RESPONSE));
    }
}
