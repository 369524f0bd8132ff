//! Event replay service
//!
//! Feeds a line-oriented event stream into a [`Session`], one event at a time,
//! and records a frame for every `render` event.

use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::services::session::{EventOutcome, Session};
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{DrawList, Event, SplitOutcome};
use crate::infrastructure::traits::FileSystem;

/// Tally of a replay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayReport {
    /// Events applied (blank and comment lines excluded).
    pub events: usize,
    pub planted: usize,
    pub splits: usize,
    pub rejected: usize,
    pub balances: usize,
    /// Corrective steps summed over all balance events.
    pub balance_steps: usize,
    /// One recorded frame per `render` event.
    pub frames: Vec<DrawList>,
}

impl ReplayReport {
    fn record(&mut self, outcome: &EventOutcome) {
        self.events += 1;
        match outcome {
            EventOutcome::Split(SplitOutcome::Planted) => self.planted += 1,
            EventOutcome::Split(SplitOutcome::Split) => self.splits += 1,
            EventOutcome::Split(SplitOutcome::Rejected) => self.rejected += 1,
            EventOutcome::Balanced { steps } => {
                self.balances += 1;
                self.balance_steps += steps;
            }
            EventOutcome::Frame => {}
        }
    }
}

/// Service for replaying event scripts against a session.
pub struct ReplayService {
    fs: Arc<dyn FileSystem>,
}

impl ReplayService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Read an event script from disk.
    pub fn load_script(&self, path: &Path) -> ApplicationResult<String> {
        debug!("load_script: {}", path.display());
        if !self.fs.exists(path) {
            return Err(ApplicationError::ScriptNotFound(path.to_path_buf()));
        }
        self.fs
            .read_to_string(path)
            .with_path_context("read script", path)
    }

    /// Apply every event in `input` to `session`, in order.
    ///
    /// `on_event` sees each event as soon as it has been applied. Replay stops
    /// at the first malformed line; events before it stay applied. The final
    /// tree's stored weights are verified before the report is returned.
    #[instrument(level = "debug", skip_all)]
    pub fn replay<R, F>(
        &self,
        session: &mut Session,
        input: R,
        mut on_event: F,
    ) -> ApplicationResult<ReplayReport>
    where
        R: BufRead,
        F: FnMut(usize, &Event, &EventOutcome),
    {
        let mut report = ReplayReport::default();

        for (idx, line) in input.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.with_context("read events")?;
            let Some(event) = Event::parse_line(&line, line_no)? else {
                continue;
            };

            let outcome = session.apply(event);
            if outcome == EventOutcome::Frame {
                let mut frame = DrawList::new();
                session.render(&mut frame);
                report.frames.push(frame);
            }
            debug!(line_no, %event, %outcome, "applied");
            report.record(&outcome);
            on_event(line_no, &event, &outcome);
        }

        session.tree().check_weights()?;
        Ok(report)
    }

    /// Replay a script held in memory.
    pub fn replay_str(&self, session: &mut Session, script: &str) -> ApplicationResult<ReplayReport> {
        self.replay(session, script.as_bytes(), |_, _, _| {})
    }

    /// Write a rendered document, creating parent directories as needed.
    pub fn write_output(&self, path: &Path, content: &str) -> ApplicationResult<()> {
        debug!("write_output: {}", path.display());
        self.fs
            .ensure_parent(path)
            .with_path_context("create parent directory", path)?;
        self.fs
            .write(path, content)
            .with_path_context("write output", path)
    }
}
