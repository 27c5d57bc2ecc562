//! Weekly summary aggregation and per-day load hints.
//!
//! Joins the generated plan with logged measurements to produce the derived
//! views: best weight, average RPE, and a recommended next load per
//! exercise. Recomputed on demand, never persisted.

use crate::logbook::Logbook;
use crate::progression::recommend_next_load;
use crate::types::{LoadHint, PlanDay, SetKey, SummaryRow, WorkoutPlan};
use chrono::{NaiveDate, Weekday};
use std::collections::BTreeMap;

#[derive(Default)]
struct Aggregate {
    best_kg: f64,
    rpes: Vec<f64>,
}

impl Aggregate {
    fn add(&mut self, weight_kg: f64, rpe: f64) {
        self.best_kg = self.best_kg.max(weight_kg);
        // Zero means "not logged"; it never counts toward the average
        if rpe > 0.0 {
            self.rpes.push(rpe);
        }
    }

    fn avg_rpe(&self) -> f64 {
        if self.rpes.is_empty() {
            0.0
        } else {
            self.rpes.iter().sum::<f64>() / self.rpes.len() as f64
        }
    }
}

/// Summary rows for the Monday-based week containing `today`
///
/// Every exercise planned in that window gets a row, logged or not; rows are
/// sorted by exercise name.
pub fn weekly_summary(plan: &WorkoutPlan, log: &Logbook, today: NaiveDate) -> Vec<SummaryRow> {
    let week = today.week(Weekday::Mon);
    let (start, end) = (week.first_day(), week.last_day());

    let mut by_exercise: BTreeMap<String, Aggregate> = BTreeMap::new();
    for day in plan.days.iter().filter(|d| d.date >= start && d.date <= end) {
        for key in day.set_keys() {
            by_exercise
                .entry(key.exercise.clone())
                .or_default()
                .add(log.weight_kg(&key), log.rpe(&key));
        }
    }

    by_exercise
        .into_iter()
        .map(|(exercise, agg)| {
            let avg_rpe = agg.avg_rpe();
            SummaryRow {
                exercise,
                best_kg: agg.best_kg,
                avg_rpe,
                next_kg: recommend_next_load(agg.best_kg, avg_rpe),
            }
        })
        .collect()
}

/// Main lifts get a per-day progression tip
fn is_main_lift(name: &str) -> bool {
    name.starts_with("Barbell") || name.contains("Squat") || name.contains("Deadlift")
}

/// Progression tips for the main lifts of one plan day
pub fn day_hints(day: &PlanDay, log: &Logbook) -> Vec<LoadHint> {
    day.items
        .iter()
        .filter(|item| is_main_lift(&item.name))
        .map(|item| {
            let mut agg = Aggregate::default();
            for set in 1..=item.sets {
                let key = SetKey::new(day.date, item.name.as_str(), set);
                agg.add(log.weight_kg(&key), log.rpe(&key));
            }
            LoadHint {
                exercise: item.name.clone(),
                best_kg: agg.best_kg,
                next_kg: recommend_next_load(agg.best_kg, agg.avg_rpe()),
            }
        })
        .collect()
}
