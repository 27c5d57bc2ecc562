//! CSV export of a plan joined with logged measurements.
//!
//! Rendering is pure: it returns the CSV text and leaves writing bytes to
//! the caller. One row per (day, exercise, set) triple in plan order.

use crate::logbook::Logbook;
use crate::types::WorkoutPlan;
use crate::{Error, Result};
use std::path::Path;

const CSV_HEADER: [&str; 6] = ["date", "exercise", "set", "weight_kg", "rpe", "completed"];

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    date: String,
    exercise: &'a str,
    set: u32,
    weight_kg: &'a str,
    rpe: &'a str,
    completed: &'a str,
}

/// Render the plan's logged sets as CSV text
///
/// The header is always present, even for a plan with no exercises. Missing
/// weight/RPE render as empty fields; completion renders `yes`/`no`.
/// Exercise names are controlled catalog data and never contain commas, so
/// no field ever needs quoting.
pub fn render_csv(plan: &WorkoutPlan, log: &Logbook) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;

    for day in &plan.days {
        for key in day.set_keys() {
            writer.serialize(CsvRow {
                date: key.date.to_string(),
                exercise: &key.exercise,
                set: key.set,
                weight_kg: log.weight_raw(&key).unwrap_or(""),
                rpe: log.rpe_raw(&key).unwrap_or(""),
                completed: if log.completed(&key) { "yes" } else { "no" },
            })?;
        }
    }

    writer.flush()?;
    let buf = writer
        .into_inner()
        .map_err(|e| Error::Other(format!("CSV buffer error: {}", e)))?;
    String::from_utf8(buf).map_err(|e| Error::Other(format!("CSV is not UTF-8: {}", e)))
}

/// Render and write the CSV to a file
pub fn write_csv(path: &Path, plan: &WorkoutPlan, log: &Logbook) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let text = render_csv(plan, log)?;
    std::fs::write(path, &text)?;

    tracing::info!("Wrote {} set rows to {:?}", plan.total_sets(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::generate_monthly;
    use crate::types::{PlanMonth, SetKey};
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    fn september_plan(work_days: &[u32]) -> WorkoutPlan {
        generate_monthly(
            PlanMonth::new(2025, 9).unwrap(),
            &work_days.iter().copied().collect(),
        )
    }

    #[test]
    fn test_header_is_first_line() {
        let plan = september_plan(&[]);
        let text = render_csv(&plan, &Logbook::default()).unwrap();
        assert_eq!(
            text.lines().next(),
            Some("date,exercise,set,weight_kg,rpe,completed")
        );
    }

    #[test]
    fn test_row_count_matches_total_sets() {
        let plan = september_plan(&[8, 9, 12]);
        let text = render_csv(&plan, &Logbook::default()).unwrap();
        let rows = text.lines().count() - 1;
        assert_eq!(rows as u32, plan.total_sets());
    }

    #[test]
    fn test_plan_without_exercises_is_header_only() {
        // Every day a work day: no exercises anywhere
        let all_days: Vec<u32> = (1..=30).collect();
        let plan = september_plan(&all_days);
        assert_eq!(plan.total_sets(), 0);

        let text = render_csv(&plan, &Logbook::default()).unwrap();
        assert_eq!(text, "date,exercise,set,weight_kg,rpe,completed\n");
    }

    #[test]
    fn test_logged_values_render_in_plan_order() {
        let plan = september_plan(&[]);
        let mut log = Logbook::default();

        let date = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let key = SetKey::new(date, "Barbell Deadlift", 2);
        log.record_weight(&key, "100");
        log.record_rpe(&key, "7.5");
        log.set_completed(&key, true);

        let text = render_csv(&plan, &log).unwrap();
        let lines: Vec<_> = text.lines().collect();

        // Day 1 is StrengthA: warm-up (1 set), then deadlift sets 1..=3
        assert_eq!(lines[1], "2025-09-01,Warm-up: bike/treadmill,1,,,no");
        assert_eq!(lines[2], "2025-09-01,Barbell Deadlift,1,,,no");
        assert_eq!(lines[3], "2025-09-01,Barbell Deadlift,2,100,7.5,yes");
        assert_eq!(lines[4], "2025-09-01,Barbell Deadlift,3,,,no");
    }

    #[test]
    fn test_unparseable_text_exports_verbatim() {
        let plan = september_plan(&[]);
        let mut log = Logbook::default();

        let date = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let key = SetKey::new(date, "Barbell Deadlift", 1);
        log.record_weight(&key, "heavy");

        let text = render_csv(&plan, &log).unwrap();
        assert!(text.contains("2025-09-01,Barbell Deadlift,1,heavy,,no"));
    }

    #[test]
    fn test_write_csv_creates_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("exports").join("workout_log.csv");

        let plan = september_plan(&[]);
        write_csv(&path, &plan, &Logbook::default()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("date,exercise,set,weight_kg,rpe,completed"));
    }
}
