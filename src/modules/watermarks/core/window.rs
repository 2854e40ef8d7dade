use chrono::NaiveDate;

/// Reserved `window_start` meaning "every candidate date is already processed".
/// Callers must check for it explicitly rather than infer it from an empty date list.
pub const NO_WORK_SENTINEL: NaiveDate = match NaiveDate::from_ymd_opt(2200, 1, 1) {
    Some(date) => date,
    None => panic!("invalid sentinel date"),
};

/// Result of resolving which source dates an extraction run must cover.
///
/// `window_start` is the earliest date the run must re-read from. `dates_to_process` is
/// ascending and, when there is work, starts one day before `window_start`. That extra day
/// gives a stateful transform a known starting boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionWindow {
    pub window_start: NaiveDate,
    pub dates_to_process: Vec<NaiveDate>,
}

impl ExtractionWindow {
    pub fn no_work_needed() -> Self {
        Self {
            window_start: NO_WORK_SENTINEL,
            dates_to_process: Vec::new(),
        }
    }

    pub fn is_no_work_needed(&self) -> bool {
        self.window_start == NO_WORK_SENTINEL
    }
}

#[cfg(test)]
mod extraction_window_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_mark_the_sentinel_window_as_no_work() {
        let window = ExtractionWindow::no_work_needed();
        assert!(window.is_no_work_needed());
        assert!(window.dates_to_process.is_empty());
        assert_eq!(window.window_start, NaiveDate::from_ymd_opt(2200, 1, 1).unwrap());
    }

    #[rstest]
    fn it_should_not_infer_no_work_from_an_empty_date_list() {
        let window = ExtractionWindow {
            window_start: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            dates_to_process: Vec::new(),
        };
        assert!(!window.is_no_work_needed());
    }
}
