//! Workout plan generation.
//!
//! Two entry points produce a full-month plan:
//! - `generate_monthly`: rotation-based, with a configured set of work/rest days
//! - `generate_explicit`: from an explicit day-to-type schedule
//!
//! Both are deterministic: identical inputs produce identical plans, and no
//! clock is consulted. "Today" is always supplied by the caller.

use crate::catalog::templates_for;
use crate::types::{PlanDay, PlanMonth, WorkoutPlan, WorkoutType};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Rotation cycle assigned to training days, in order
const CYCLE: [WorkoutType; 4] = [
    WorkoutType::StrengthA,
    WorkoutType::Cardio,
    WorkoutType::StrengthB,
    WorkoutType::Yoga,
];

/// Fallback reminder text when the plan has no entry for the given date
const NO_PLAN_SUMMARY: &str = "Your plan awaits!";

/// Summary shown for days an explicit schedule leaves unassigned
const UNASSIGNED_SUMMARY: &str = "—";

fn plan_day(date: NaiveDate, kind: WorkoutType) -> PlanDay {
    PlanDay {
        date,
        kind,
        summary: kind.label().to_string(),
        items: templates_for(kind).to_vec(),
    }
}

/// Generate a month plan from a set of work/rest day numbers.
///
/// Days listed in `work_days` become Rest days; every other day takes the
/// next type from the rotation cycle. The cycle counter advances only on
/// training days, so rest days do not consume a cycle slot. Day numbers
/// outside the month are ignored.
pub fn generate_monthly(month: PlanMonth, work_days: &BTreeSet<u32>) -> WorkoutPlan {
    let len = month.days_in_month();
    let (days, _) = (1..=len)
        .filter_map(|day| month.date(day).map(|date| (day, date)))
        .fold(
            (Vec::with_capacity(len as usize), 0usize),
            |(mut days, slot), (day, date)| {
                if work_days.contains(&day) {
                    days.push(plan_day(date, WorkoutType::Rest));
                    (days, slot)
                } else {
                    days.push(plan_day(date, CYCLE[slot % CYCLE.len()]));
                    (days, slot + 1)
                }
            },
        );

    tracing::debug!(
        "Generated monthly plan for {}: {} days, {} rest",
        month,
        days.len(),
        days.iter()
            .filter(|d| d.kind == WorkoutType::Rest)
            .count()
    );

    WorkoutPlan {
        month,
        work_days: work_days
            .iter()
            .copied()
            .filter(|d| (1..=len).contains(d))
            .collect(),
        days,
    }
}

/// Generate a month plan from an explicit day-to-type schedule.
///
/// Days present in `schedule` get that type with its label and templates;
/// absent days become Rest with an em-dash summary and no items, without
/// advancing any rotation. Day numbers outside the month are ignored.
pub fn generate_explicit(month: PlanMonth, schedule: &BTreeMap<u32, WorkoutType>) -> WorkoutPlan {
    let days = (1..=month.days_in_month())
        .filter_map(|day| month.date(day).map(|date| (day, date)))
        .map(|(day, date)| match schedule.get(&day) {
            Some(&kind) => plan_day(date, kind),
            None => PlanDay {
                date,
                kind: WorkoutType::Rest,
                summary: UNASSIGNED_SUMMARY.to_string(),
                items: Vec::new(),
            },
        })
        .collect();

    WorkoutPlan {
        month,
        work_days: BTreeSet::new(),
        days,
    }
}

/// Reminder body text for the plan day matching `today`.
pub fn today_summary(plan: &WorkoutPlan, today: NaiveDate) -> String {
    plan.day_on(today)
        .map(|d| d.summary.clone())
        .unwrap_or_else(|| NO_PLAN_SUMMARY.to_string())
}
