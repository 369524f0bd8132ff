//! Host triggers and their line-oriented text form.
//!
//! ```text
//! # comments and blank lines are skipped
//! split 225 400
//! balance
//! render
//! ```

use std::fmt;
use std::str::FromStr;

use kurbo::Point;

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Split the region under a point.
    Split(Point),
    /// Rebalance the whole tree.
    Balance,
    /// Emit a frame.
    Render,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Split(p) => write!(f, "split {} {}", p.x, p.y),
            Event::Balance => f.write_str("balance"),
            Event::Render => f.write_str("render"),
        }
    }
}

impl Event {
    /// Parse one script line. `Ok(None)` for blank and comment lines.
    ///
    /// `line_no` is 1-based and only used in error messages.
    pub fn parse_line(line: &str, line_no: usize) -> Result<Option<Self>, DomainError> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }

        let invalid = |message: String| DomainError::InvalidEvent {
            line: line_no,
            message,
        };

        let mut words = trimmed.split_whitespace();
        let keyword = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();

        match (keyword.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("split", [x, y]) => {
                let x = parse_coord(x).map_err(&invalid)?;
                let y = parse_coord(y).map_err(&invalid)?;
                Ok(Some(Event::Split(Point::new(x, y))))
            }
            ("split", _) => Err(invalid(format!(
                "split takes two coordinates, got {}",
                args.len()
            ))),
            ("balance", []) => Ok(Some(Event::Balance)),
            ("render", []) => Ok(Some(Event::Render)),
            ("balance" | "render", _) => Err(invalid(format!("{keyword} takes no arguments"))),
            _ => Err(invalid(format!("unknown event: {keyword}"))),
        }
    }

    /// Parse a whole script, skipping blank and comment lines.
    pub fn parse_script(content: &str) -> Result<Vec<Self>, DomainError> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            if let Some(event) = Self::parse_line(line, idx + 1)? {
                events.push(event);
            }
        }
        Ok(events)
    }
}

impl FromStr for Event {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_line(s, 1)?.ok_or_else(|| DomainError::InvalidEvent {
            line: 1,
            message: "empty event".to_string(),
        })
    }
}

fn parse_coord(raw: &str) -> Result<f64, String> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(format!("coordinate is not finite: {raw}")),
        Err(_) => Err(format!("not a number: {raw}")),
    }
}
