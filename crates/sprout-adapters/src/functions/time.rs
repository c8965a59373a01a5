//! `time_*`: the generation timestamp in various layouts.

use chrono::{
    DateTime, Local,
    format::{Item, StrftimeItems},
};
use serde_json::Value;
use sprout_core::domain::{Extension, TemplateFn};

use super::{function, optional_str, required_str};

const DATE: &str = "%b %d, %Y";
const RFC1123: &str = "%a, %d %b %Y %H:%M:%S %Z";
const KITCHEN: &str = "%-I:%M%p";

/// Time functions. The clock is read once, so every template in a run
/// sees the same instant.
#[derive(Debug, Clone, Copy)]
pub struct TimeFunctions {
    now: DateTime<Local>,
}

impl TimeFunctions {
    pub fn now() -> Self {
        Self::at(Local::now())
    }

    pub fn at(now: DateTime<Local>) -> Self {
        Self { now }
    }
}

/// Format with a strftime layout, rejecting layouts chrono cannot render.
fn format(now: &DateTime<Local>, layout: &str) -> Result<Value, String> {
    if StrftimeItems::new(layout).any(|item| matches!(item, Item::Error)) {
        return Err(format!("invalid time format {layout:?}"));
    }
    Ok(Value::String(now.format(layout).to_string()))
}

fn fixed(now: DateTime<Local>, layout: &'static str) -> TemplateFn {
    function(move |_| format(&now, layout))
}

impl Extension for TimeFunctions {
    fn namespace(&self) -> &'static str {
        "time"
    }

    fn functions(&self) -> Vec<(&'static str, TemplateFn)> {
        let now = self.now;
        vec![
            ("now", function(move |args| format(&now, required_str(args, "format")?))),
            (
                "date",
                function(move |args| format(&now, optional_str(args, "format")?.unwrap_or(DATE))),
            ),
            ("year", fixed(now, "%Y")),
            ("rfc3339", function(move |_| Ok(Value::String(now.to_rfc3339())))),
            ("rfc1123", fixed(now, RFC1123)),
            ("kitchen", fixed(now, KITCHEN)),
        ]
    }
}
