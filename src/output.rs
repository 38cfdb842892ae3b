//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::Call;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Trait for human-readable key-value output.
///
/// Implemented by resource types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for Call {
    fn pretty_print(&self) -> String {
        let header = format!("Call: {}", self.sid);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("Status:         {}", self.status),
        ];

        if let Some(ref from) = self.from {
            lines.push(format!("From:           {}", from));
        }

        if let Some(ref to) = self.to {
            lines.push(format!("To:             {}", to));
        }

        if let Some(ref direction) = self.direction {
            lines.push(format!("Direction:      {}", direction));
        }

        if let Some(ref start) = self.start_time {
            lines.push(format!("Started:        {}", start.format(TIME_FORMAT)));
        }

        if let Some(ref end) = self.end_time {
            lines.push(format!("Ended:          {}", end.format(TIME_FORMAT)));
        }

        if let Some(duration) = self.duration {
            lines.push(format!("Duration:       {}s", duration));
        }

        if let Some(ref price) = self.price {
            let unit = self.price_unit.as_deref().unwrap_or("");
            lines.push(format!("Price:          {} {}", price, unit).trim_end().to_string());
        }

        lines.join("\n")
    }
}
