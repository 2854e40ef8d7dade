// Pure window resolution: which source dates the next extraction run must cover.
//
// Rules
// - Candidates are every date from the day before `first_date` through `today`. That first
//   day is an anchor only and never counts as missing.
// - No log (cold start): every candidate is returned and the window starts at `first_date`.
// - Log present: the window starts at the earliest candidate the log does not contain, and
//   the dates to process begin one day before it.
// - Nothing missing: the year-2200 sentinel window with no dates.
// - Never performs input or output and never fails.

use crate::modules::watermarks::core::log::WatermarkLog;
use crate::modules::watermarks::core::window::ExtractionWindow;
use crate::shared::core::primitives::date_range_inclusive;
use chrono::NaiveDate;

pub fn resolve_extraction_window(
    first_date: NaiveDate,
    log: Option<&WatermarkLog>,
    today: NaiveDate,
) -> ExtractionWindow {
    let anchor = first_date.pred_opt().unwrap_or(first_date);
    let candidates = date_range_inclusive(anchor, today);

    let Some(log) = log else {
        return ExtractionWindow {
            window_start: first_date,
            dates_to_process: candidates,
        };
    };

    let processed = log.processed_source_dates();
    let first_missing = candidates
        .iter()
        .skip(1)
        .find(|date| !processed.contains(date))
        .copied();

    match first_missing {
        Some(window_start) => {
            let overlap_start = window_start.pred_opt().unwrap_or(window_start);
            ExtractionWindow {
                window_start,
                dates_to_process: candidates
                    .into_iter()
                    .filter(|date| *date >= overlap_start)
                    .collect(),
            }
        }
        None => ExtractionWindow::no_work_needed(),
    }
}
