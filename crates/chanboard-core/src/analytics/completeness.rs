//! Whether the most recent bucket covers a fully elapsed period
//!
//! Advisory only: drives the "last week is incomplete" note.

use crate::analytics::aggregate::{next_period_start, period_start};
use crate::models::Granularity;
use chrono::NaiveDate;

/// True once the period starting at `period_start` has fully elapsed by `today`
pub fn is_period_complete(
    period_start_date: NaiveDate,
    today: NaiveDate,
    granularity: Granularity,
) -> bool {
    match granularity {
        Granularity::Daily => period_start_date < today,
        Granularity::Weekly => (today - period_start_date).num_days() >= 7,
        Granularity::Monthly | Granularity::Quarterly => {
            let aligned = period_start(period_start_date, granularity);
            match next_period_start(aligned, granularity) {
                Some(next) => today >= next,
                None => false,
            }
        }
    }
}

/// Caption shown under a chart whose last bucket is still open
pub fn incomplete_note(granularity: Granularity) -> String {
    format!("Note: The last {} is incomplete.", granularity.period_noun())
}
