//! Core domain types for the Liftplan workout planner.
//!
//! This module defines the fundamental types used throughout the system:
//! - Workout types and exercise templates
//! - Plan days and monthly plans
//! - Logged-set keys and set entries
//! - Summary rows and load hints

use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Workout Types
// ============================================================================

/// Type of workout assigned to a calendar day
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    StrengthA,
    StrengthB,
    Cardio,
    Yoga,
    Rest,
}

impl WorkoutType {
    /// Display label used in plans, summaries, and reminder text
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutType::StrengthA => "Strength A (Deadlift + Pull)",
            WorkoutType::StrengthB => "Strength B (Squat + Push)",
            WorkoutType::Cardio => "Cardio",
            WorkoutType::Yoga => "Yoga / Recovery",
            WorkoutType::Rest => "Work/Rest",
        }
    }
}

/// One exercise template within a day's workout
///
/// Templates are fixed content from the catalog and are never mutated
/// after creation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseItem {
    pub name: String,
    #[serde(default = "default_sets")]
    pub sets: u32,
    pub detail: Option<String>,
}

fn default_sets() -> u32 {
    3
}

impl ExerciseItem {
    pub fn new(name: impl Into<String>, sets: u32, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sets,
            detail: Some(detail.into()),
        }
    }
}

// ============================================================================
// Plan Types
// ============================================================================

/// A calendar month identifying one generated plan
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PlanMonth {
    year: i32,
    month: u32,
}

impl PlanMonth {
    /// Create a month; `month` must be in 1..=12
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::Plan(format!("month {} out of range 1..=12", month)));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month {
            4 | 6 | 9 | 11 => 30,
            2 => {
                if (self.year % 4 == 0 && self.year % 100 != 0) || self.year % 400 == 0 {
                    29
                } else {
                    28
                }
            }
            _ => 31,
        }
    }

    /// Date of a day number within this month, or None when out of range
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        if day < 1 || day > self.days_in_month() {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        use chrono::Datelike;
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for PlanMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for PlanMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| Error::Plan(format!("expected YYYY-MM, got '{}'", s)))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| Error::Plan(format!("invalid year in '{}'", s)))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| Error::Plan(format!("invalid month in '{}'", s)))?;
        Self::new(year, month)
    }
}

/// One calendar day of a generated plan
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlanDay {
    pub date: NaiveDate,
    pub kind: WorkoutType,
    pub summary: String,
    #[serde(default)]
    pub items: Vec<ExerciseItem>,
}

impl PlanDay {
    /// Logged-set keys for every (exercise, set) pair of this day, in plan order
    pub fn set_keys(&self) -> impl Iterator<Item = SetKey> + '_ {
        let date = self.date;
        self.items
            .iter()
            .flat_map(move |item| {
                (1..=item.sets).map(move |set| SetKey::new(date, item.name.as_str(), set))
            })
    }
}

/// A full generated plan covering one month
///
/// Invariant: `days` holds exactly one entry per calendar day of `month`,
/// sorted ascending, no gaps or duplicates.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutPlan {
    pub month: PlanMonth,
    pub work_days: BTreeSet<u32>,
    pub days: Vec<PlanDay>,
}

impl WorkoutPlan {
    pub fn day_on(&self, date: NaiveDate) -> Option<&PlanDay> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Total number of (exercise, set) pairs across the plan
    pub fn total_sets(&self) -> u32 {
        self.days
            .iter()
            .flat_map(|d| d.items.iter())
            .map(|item| item.sets)
            .sum()
    }
}

// ============================================================================
// Logged-Set Types
// ============================================================================

/// Composite identifier joining a date, exercise name, and 1-based set index
///
/// Renders as `date|exercise|setN`, the key scheme under which measurements
/// are persisted. Uniqueness within a plan follows from exercise names being
/// distinct within a day's item list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SetKey {
    pub date: NaiveDate,
    pub exercise: String,
    pub set: u32,
}

impl SetKey {
    pub fn new(date: NaiveDate, exercise: impl Into<String>, set: u32) -> Self {
        Self {
            date,
            exercise: exercise.into(),
            set,
        }
    }

    /// Key of the weight cell in the external key-value scheme
    pub fn weight_key(&self) -> String {
        format!("{}|w", self)
    }

    /// Key of the RPE cell in the external key-value scheme
    pub fn rpe_key(&self) -> String {
        format!("{}|r", self)
    }
}

impl fmt::Display for SetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|set{}", self.date, self.exercise, self.set)
    }
}

/// Measurements recorded for one logged set
///
/// Weight and RPE keep the raw entered text; parsing to numbers happens at
/// read time and degrades to 0 on unparseable input.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SetEntry {
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpe: Option<String>,
}

// ============================================================================
// Derived Types
// ============================================================================

/// One exercise line of the weekly summary
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryRow {
    pub exercise: String,
    pub best_kg: f64,
    pub avg_rpe: f64,
    pub next_kg: f64,
}

/// Per-day progression tip for a main lift
#[derive(Clone, Debug, PartialEq)]
pub struct LoadHint {
    pub exercise: String,
    pub best_kg: f64,
    pub next_kg: f64,
}
