//! Response framing holds however the bytes are split on the wire

use proptest::prelude::*;
use serde_json::json;
use std::io::{self, Read};
use woodshop_bridge::tcp::read_response;

struct Split {
    data: Vec<u8>,
    cuts: Vec<usize>,
}

impl Read for Split {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Ok(0);
        }
        let want = self.cuts.pop().unwrap_or(self.data.len());
        let n = want.clamp(1, self.data.len()).min(buf.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data.drain(..n);
        Ok(n)
    }
}

proptest! {
    #[test]
    fn test_any_split_reassembles(
        text in "[a-zA-Z0-9 {}\"\\\\]{0,200}",
        cuts in prop::collection::vec(1usize..64, 0..20),
    ) {
        let reply = json!({
            "jsonrpc": "2.0",
            "result": {"content": [{"type": "text", "text": text}], "isError": false},
            "id": "x"
        });
        let mut bytes = serde_json::to_vec(&reply).unwrap();
        bytes.push(b'\n');

        let mut reader = Split { data: bytes, cuts };
        let value = read_response(&mut reader, 1024, 1.0).unwrap();
        prop_assert_eq!(value, reply);
    }
}
