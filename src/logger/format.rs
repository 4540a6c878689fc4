//! Access line formats
//!
//! - `short`: `METHOD TARGET YEAR`
//! - `common`: `[time] "METHOD TARGET"` in Common Log Format time style
//! - `json`: one JSON object per line
//!
//! Unknown format names fall back to `short`.

use chrono::{DateTime, Datelike, Local};
use serde_json::json;

#[derive(Debug, Clone)]
pub struct AccessLine {
    pub method: String,
    /// Path plus query string, as received
    pub target: String,
    pub time: DateTime<Local>,
}

impl AccessLine {
    pub fn format(&self, format: &str) -> String {
        match format {
            "common" => self.format_common(),
            "json" => self.format_json(),
            _ => self.format_short(),
        }
    }

    fn format_short(&self) -> String {
        format!("{} {} {}", self.method, self.target, self.time.year())
    }

    fn format_common(&self) -> String {
        format!(
            "[{}] \"{} {}\"",
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            self.target
        )
    }

    fn format_json(&self) -> String {
        json!({
            "method": self.method,
            "target": self.target,
            "time": self.time.to_rfc3339(),
        })
        .to_string()
    }
}
