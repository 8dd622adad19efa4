//! Change between the two most recent buckets

use crate::format::{format_signed_thousands, format_signed_percent};
use serde::Serialize;

/// Absolute and percentage change of the last value versus the previous one
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Delta {
    pub absolute: f64,
    pub percent: f64,
}

impl Delta {
    /// Display text, e.g. `+1,234 (+5.00%)`
    pub fn label(&self) -> String {
        format!(
            "{} ({})",
            format_signed_thousands(self.absolute),
            format_signed_percent(self.percent)
        )
    }

    pub fn is_increase(&self) -> bool {
        self.absolute > 0.0
    }

    pub fn is_decrease(&self) -> bool {
        self.absolute < 0.0
    }
}

/// Compare the last value to the second-to-last.
///
/// Fewer than two values gives (0, 0). A previous value of exactly zero
/// gives a percent change of 0.
pub fn calculate_delta(values: &[f64]) -> Delta {
    let [.., previous, current] = values else {
        return Delta::default();
    };

    let absolute = current - previous;
    let percent = if *previous != 0.0 {
        absolute / previous * 100.0
    } else {
        0.0
    };

    Delta { absolute, percent }
}
