//! Stress-Mode Key:Value Summary
//!
//! `summary.txt` is the stress run's persisted result: three `key:value`
//! lines. The parser is the inverse of the renderer so the cross-run
//! analyzer can read summaries written by any previous run.

use crate::report::StressSummary;

/// Render `summary.txt` contents.
pub fn render_stress_summary(summary: &StressSummary) -> String {
    format!(
        "single_time:{}\nmulti_time:{}\nspeedup:{}\n",
        summary.single_time, summary.multi_time, summary.speedup
    )
}

/// Parse `summary.txt` contents. Returns `None` when any of the three keys
/// is missing or does not parse.
pub fn parse_stress_summary(contents: &str) -> Option<StressSummary> {
    let mut single_time = None;
    let mut multi_time = None;
    let mut speedup = None;

    for line in contents.lines() {
        let (key, value) = line.split_once(':')?;
        let value: f64 = value.trim().parse().ok()?;
        match key.trim() {
            "single_time" => single_time = Some(value),
            "multi_time" => multi_time = Some(value),
            "speedup" => speedup = Some(value),
            _ => {}
        }
    }

    Some(StressSummary {
        single_time: single_time?,
        multi_time: multi_time?,
        speedup: speedup?,
    })
}
