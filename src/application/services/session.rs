//! Interactive session
//!
//! Holds the zero-or-one subdivision tree of a running session together with
//! the fixed root disc every trigger is resolved against.

use std::fmt;

use kurbo::{Circle, Point};
use tracing::{debug, info, instrument, warn};

use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::{Canvas, Event, LabelStyle, SplitOutcome, SubdivisionTree};

/// What applying one event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Split(SplitOutcome),
    /// Rebalance ran; `steps` corrective steps were taken.
    Balanced { steps: usize },
    /// A frame was requested. The session itself is unchanged.
    Frame,
}

impl fmt::Display for EventOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventOutcome::Split(outcome) => write!(f, "{outcome}"),
            EventOutcome::Balanced { steps } => write!(f, "balanced ({steps} steps)"),
            EventOutcome::Frame => f.write_str("frame"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    disc: Circle,
    style: LabelStyle,
    tree: SubdivisionTree,
}

impl Session {
    pub fn new(disc: Circle, style: LabelStyle) -> Self {
        Self {
            disc,
            style,
            tree: SubdivisionTree::new(),
        }
    }

    /// Session with the root disc and label style taken from settings.
    pub fn from_settings(settings: &Settings) -> ApplicationResult<Self> {
        Ok(Self::new(settings.root_disc()?, settings.label_style()))
    }

    pub fn disc(&self) -> Circle {
        self.disc
    }

    pub fn tree(&self) -> &SubdivisionTree {
        &self.tree
    }

    #[instrument(level = "debug", skip(self))]
    pub fn split(&mut self, target: Point) -> SplitOutcome {
        let outcome = self.tree.split(self.disc, target);
        match outcome {
            SplitOutcome::Rejected => {
                warn!("cannot subdivide already divided region at {target:?}");
            }
            _ => debug!(%outcome, weight = self.tree.weight(), "split applied"),
        }
        outcome
    }

    #[instrument(level = "debug", skip(self))]
    pub fn balance(&mut self) -> usize {
        let steps = self.tree.balance();
        info!(
            steps,
            weight = self.tree.weight(),
            depth = self.tree.depth(),
            "balanced"
        );
        steps
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        self.tree.render(self.disc, canvas, &self.style);
    }

    /// Apply one host event. Rendering is left to the caller, which owns the canvas.
    pub fn apply(&mut self, event: Event) -> EventOutcome {
        match event {
            Event::Split(target) => EventOutcome::Split(self.split(target)),
            Event::Balance => EventOutcome::Balanced {
                steps: self.balance(),
            },
            Event::Render => EventOutcome::Frame,
        }
    }
}
