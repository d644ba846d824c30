//! External collaborators.
//!
//! Identity, payment and leaderboard storage live outside the engine. The
//! engine only sees a yes/no gate at construction, an opaque session token,
//! and a sink that receives one record per solve.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// Decides whether a puzzle may start. Checked once in `create()`.
pub trait EntitlementGate {
    fn may_start(&self) -> bool;
}

impl EntitlementGate for bool {
    fn may_start(&self) -> bool {
        *self
    }
}

/// Opaque user id attached to completion results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionToken {
    user_id: Option<String>,
}

impl SessionToken {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub puzzle_id: String,
    pub user_id: Option<String>,
    pub completion_time_seconds: f64,
    pub move_count: u32,
    pub solved: bool,
}

/// Receives completion records.
pub trait ResultSink {
    fn submit(&mut self, record: &CompletionRecord) -> io::Result<()>;
}

/// Drops every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

impl ResultSink for DiscardSink {
    fn submit(&mut self, _record: &CompletionRecord) -> io::Result<()> {
        Ok(())
    }
}

/// Keeps records in memory. Clones share the same list.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<CompletionRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<CompletionRecord> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ResultSink for MemorySink {
    fn submit(&mut self, record: &CompletionRecord) -> io::Result<()> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "result store poisoned"))?;
        records.push(record.clone());
        Ok(())
    }
}

/// Writes one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResultSink for JsonLinesSink<W> {
    fn submit(&mut self, record: &CompletionRecord) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CompletionRecord {
        CompletionRecord {
            puzzle_id: "p1".to_string(),
            user_id: Some("u7".to_string()),
            completion_time_seconds: 12.5,
            move_count: 9,
            solved: true,
        }
    }

    #[test]
    fn bool_gate() {
        assert!(true.may_start());
        assert!(!false.may_start());
    }

    #[test]
    fn memory_sink_clones_share_records() {
        let sink = MemorySink::new();
        let mut writer = sink.clone();
        writer.submit(&record()).unwrap();
        assert_eq!(sink.records(), vec![record()]);
    }

    #[test]
    fn json_lines_sink_writes_one_line_per_record() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.submit(&record()).unwrap();
        sink.submit(&record()).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let v: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(v["puzzle_id"], "p1");
        assert_eq!(v["user_id"], "u7");
        assert_eq!(v["move_count"], 9);
        assert_eq!(v["solved"], true);
        let back: CompletionRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(back, record());
    }

    #[test]
    fn anonymous_session_has_no_user() {
        assert_eq!(SessionToken::anonymous().user_id(), None);
        assert_eq!(SessionToken::new("ann").user_id(), Some("ann"));
    }
}
