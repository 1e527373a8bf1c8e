//! Logging preview of a run's first classified records.

use log::info;
use pitchside_core::ClassifiedRecord;

/// Number of records shown by [`log_preview`].
pub const PREVIEW_ROWS: usize = 5;

/// Log the first [`PREVIEW_ROWS`] records at `info` level and return how many
/// were shown.
pub fn log_preview(records: &[ClassifiedRecord]) -> usize {
    let shown = records.iter().take(PREVIEW_ROWS);
    let mut count = 0;
    for record in shown {
        info!(
            "lat={:.6} lon={:.6} tags={} primary={}",
            record.point.lat(),
            record.point.lon(),
            record.tags.joined(),
            record.primary_tag.as_deref().unwrap_or("-")
        );
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitchside_core::{FilterMode, PriorityOrder, RawRecord, run};
    use rstest::rstest;

    #[rstest]
    #[case(0, 0)]
    #[case(3, 3)]
    #[case(8, 5)]
    fn preview_is_capped(#[case] rows: usize, #[case] shown: usize) {
        let table: Vec<RawRecord> = (0..rows)
            .map(|i| RawRecord::new(format!("POINT ({i} 0)"), "cricket"))
            .collect();
        let report = run(&table, &FilterMode::All, &PriorityOrder::default());
        assert_eq!(log_preview(&report.classified), shown);
    }
}
