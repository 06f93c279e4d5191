//! Loopback stand-in for the modeling application's bridge extension

use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use woodshop_bridge::BridgeConfig;

/// What the fake does with each accepted connection.
#[derive(Debug, Clone)]
pub enum Session {
    /// Read one request and answer with the given tool result.
    Reply(Value),
    /// Read one request and answer with a JSON-RPC error.
    Error(String),
    /// Read one request and close without answering.
    Hangup,
}

/// Lines received on each connection.
pub type Transcript = Vec<Vec<Value>>;

pub struct FakeServer {
    pub port: u16,
    handle: JoinHandle<Transcript>,
}

impl FakeServer {
    /// Serve one session per connection, in order. With `expect_auth` the
    /// first line of every connection is read as the auth line.
    pub fn start(sessions: Vec<Session>, expect_auth: bool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let handle = thread::spawn(move || {
            let mut transcript = Vec::new();
            for session in sessions {
                let (stream, _) = listener.accept().unwrap();
                transcript.push(serve(stream, session, expect_auth));
            }
            transcript
        });
        Self { port, handle }
    }

    pub fn config(&self) -> BridgeConfig {
        BridgeConfig {
            port: self.port,
            timeout_secs: 5.0,
            ..Default::default()
        }
    }

    pub fn finish(self) -> Transcript {
        self.handle.join().unwrap()
    }
}

fn serve(stream: TcpStream, session: Session, expect_auth: bool) -> Vec<Value> {
    let mut writer = stream.try_clone().unwrap();
    let mut reader = BufReader::new(stream);
    let mut lines = Vec::new();

    let wanted = if expect_auth { 2 } else { 1 };
    while lines.len() < wanted {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap() == 0 {
            return lines;
        }
        lines.push(serde_json::from_str(line.trim()).unwrap());
    }

    let id = lines.last().and_then(|r: &Value| r.get("id").cloned()).unwrap_or(Value::Null);
    let reply = match session {
        Session::Reply(result) => json!({"jsonrpc": "2.0", "result": result, "id": id}),
        Session::Error(message) => json!({
            "jsonrpc": "2.0",
            "error": {"code": -32603, "message": message},
            "id": id
        }),
        Session::Hangup => return lines,
    };
    let mut bytes = serde_json::to_vec(&reply).unwrap();
    bytes.push(b'\n');
    writer.write_all(&bytes).unwrap();
    writer.flush().unwrap();
    lines
}

/// A tool result carrying one text item.
pub fn text_result(text: &str, is_error: bool) -> Value {
    json!({
        "content": [{"type": "text", "text": text}],
        "isError": is_error
    })
}

/// A port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}
