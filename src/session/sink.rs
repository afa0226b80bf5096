//! Delivery targets for the match stream

use std::io::Write;

use crate::core::error::{ConquestError, Result};
use crate::session::snapshot::{MatchMessage, Snapshot};

/// Receives every message a match emits, in order
pub trait SnapshotSink {
    fn deliver(&mut self, message: &MatchMessage) -> Result<()>;
}

impl<S: SnapshotSink + ?Sized> SnapshotSink for &mut S {
    fn deliver(&mut self, message: &MatchMessage) -> Result<()> {
        (**self).deliver(message)
    }
}

/// In-memory record of a match, indexed by turn
///
/// Lets a late observer catch up on everything sent so far.
#[derive(Clone, Debug, Default)]
pub struct MatchHistory {
    snapshots: Vec<Snapshot>,
    stopped: bool,
}

impl MatchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a snapshot at its turn, replacing that turn and dropping later ones
    pub fn record(&mut self, snapshot: Snapshot) -> Result<()> {
        let turn = snapshot.turn as usize;
        if turn > self.snapshots.len() {
            return Err(ConquestError::InvariantViolation(format!(
                "snapshot for turn {turn} arrived with only {} turns recorded",
                self.snapshots.len()
            )));
        }
        self.snapshots.truncate(turn);
        self.snapshots.push(snapshot);
        Ok(())
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn turn(&self, turn: u32) -> Option<&Snapshot> {
        self.snapshots.get(turn as usize)
    }

    /// Snapshots for turns `from..=to`, clamped to what has been recorded
    pub fn turns(&self, from: u32, to: u32) -> &[Snapshot] {
        let start = (from as usize).min(self.snapshots.len());
        let end = (to as usize).saturating_add(1).min(self.snapshots.len());
        if end <= start {
            return &[];
        }
        &self.snapshots[start..end]
    }

    pub fn all(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl SnapshotSink for MatchHistory {
    fn deliver(&mut self, message: &MatchMessage) -> Result<()> {
        match message {
            MatchMessage::State(snapshot) => self.record(snapshot.clone()),
            MatchMessage::Stop { .. } => {
                self.stopped = true;
                Ok(())
            }
        }
    }
}

/// Writes each message as one line of JSON
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

impl<W: Write> SnapshotSink for JsonLinesSink<W> {
    fn deliver(&mut self, message: &MatchMessage) -> Result<()> {
        serde_json::to_writer(&mut self.writer, message)?;
        self.writer.write_all(b"\n")?;
        if message.is_stop() {
            self.writer.flush()?;
        }
        Ok(())
    }
}
