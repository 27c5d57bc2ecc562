//! Fixed exercise-template catalog.
//!
//! Each workout type maps to an ordered list of exercise templates. The
//! content is static and stable within one deployment; exercise names double
//! as identifiers in logged-set keys.

use crate::types::{ExerciseItem, WorkoutType};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_catalog);

/// Templates for a workout type, in display order
pub fn templates_for(kind: WorkoutType) -> &'static [ExerciseItem] {
    DEFAULT_CATALOG.templates(kind)
}

/// The complete mapping from workout type to exercise templates
#[derive(Clone, Debug)]
pub struct Catalog {
    templates: HashMap<WorkoutType, Vec<ExerciseItem>>,
}

impl Catalog {
    pub fn templates(&self, kind: WorkoutType) -> &[ExerciseItem] {
        self.templates.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Validate the catalog for consistency
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (kind, items) in &self.templates {
            let mut seen = std::collections::HashSet::new();
            for item in items {
                if item.name.is_empty() {
                    errors.push(format!("{:?} has an exercise with an empty name", kind));
                }
                if item.sets < 1 {
                    errors.push(format!("{:?}: '{}' has zero sets", kind, item.name));
                }
                // Names are embedded in logged-set keys and CSV rows
                if item.name.contains(&['|', ',', '"', '\n'][..]) {
                    errors.push(format!(
                        "{:?}: '{}' contains a reserved character",
                        kind, item.name
                    ));
                }
                if !seen.insert(item.name.as_str()) {
                    errors.push(format!("{:?}: duplicate exercise name '{}'", kind, item.name));
                }
            }
        }

        if self.templates(WorkoutType::StrengthA).is_empty() {
            errors.push("Catalog has no Strength A exercises".to_string());
        }
        if self.templates(WorkoutType::StrengthB).is_empty() {
            errors.push("Catalog has no Strength B exercises".to_string());
        }
        if !self.templates(WorkoutType::Rest).is_empty() {
            errors.push("Rest days must have no exercises".to_string());
        }

        errors
    }
}

/// Builds the catalog of exercise templates per workout type
pub fn build_catalog() -> Catalog {
    let mut templates = HashMap::new();

    templates.insert(
        WorkoutType::StrengthA,
        vec![
            ExerciseItem::new("Warm-up: bike/treadmill", 1, "5 min"),
            ExerciseItem::new("Barbell Deadlift", 3, "3×8 reps — light to moderate"),
            ExerciseItem::new("Dumbbell Bench Press", 3, "3×10 reps"),
            ExerciseItem::new("One-arm Dumbbell Row", 3, "3×10 each side"),
            ExerciseItem::new("Assisted Pull-ups / Band", 3, "Max reps"),
            ExerciseItem::new("Bodyweight Squats", 3, "3×12 reps"),
            ExerciseItem::new("Plank", 3, "3×30 sec"),
        ],
    );

    templates.insert(
        WorkoutType::StrengthB,
        vec![
            ExerciseItem::new("Warm-up: bike/treadmill", 1, "5 min"),
            ExerciseItem::new("Barbell Back Squat", 3, "3×8 reps — light to moderate"),
            ExerciseItem::new("Dumbbell Shoulder Press", 3, "3×10 reps"),
            ExerciseItem::new("Leg Curl Machine", 3, "3×12 reps"),
            ExerciseItem::new("Dumbbell RDL", 3, "3×10 reps"),
            ExerciseItem::new("Push-ups (knees if needed)", 3, "Max reps"),
            ExerciseItem::new("Dead Bugs", 3, "3×10 each side"),
        ],
    );

    templates.insert(
        WorkoutType::Cardio,
        vec![
            ExerciseItem::new("Peloton ride OR Treadmill intervals", 1, "20–30 min"),
            ExerciseItem::new(
                "Mobility finisher",
                1,
                "5–10 min: cat-cow, hip openers, shoulder rolls",
            ),
        ],
    );

    templates.insert(
        WorkoutType::Yoga,
        vec![ExerciseItem::new(
            "Yoga (home/Peloton)",
            1,
            "30 min focus: flexibility & breath",
        )],
    );

    templates.insert(WorkoutType::Rest, Vec::new());

    Catalog { templates }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sizes() {
        let catalog = build_catalog();
        assert_eq!(catalog.templates(WorkoutType::StrengthA).len(), 7);
        assert_eq!(catalog.templates(WorkoutType::StrengthB).len(), 7);
        assert_eq!(catalog.templates(WorkoutType::Cardio).len(), 2);
        assert_eq!(catalog.templates(WorkoutType::Yoga).len(), 1);
        assert!(catalog.templates(WorkoutType::Rest).is_empty());
    }

    #[test]
    fn test_names_unique_within_each_type() {
        let catalog = build_catalog();
        for kind in [
            WorkoutType::StrengthA,
            WorkoutType::StrengthB,
            WorkoutType::Cardio,
            WorkoutType::Yoga,
        ] {
            let items = catalog.templates(kind);
            let unique: std::collections::HashSet<_> =
                items.iter().map(|i| i.name.as_str()).collect();
            assert_eq!(unique.len(), items.len(), "duplicate name under {:?}", kind);
        }
    }

    #[test]
    fn test_catalog_validates() {
        let errors = build_catalog().validate();
        assert!(errors.is_empty(), "catalog validation errors: {:?}", errors);
    }

    #[test]
    fn test_validate_flags_reserved_characters() {
        let mut catalog = build_catalog();
        catalog.templates.insert(
            WorkoutType::Yoga,
            vec![ExerciseItem::new("Sun, Salutation", 1, "10 min")],
        );
        let errors = catalog.validate();
        assert!(errors.iter().any(|e| e.contains("reserved character")));
    }

    #[test]
    fn test_every_set_count_positive() {
        let catalog = build_catalog();
        for kind in [
            WorkoutType::StrengthA,
            WorkoutType::StrengthB,
            WorkoutType::Cardio,
            WorkoutType::Yoga,
        ] {
            for item in catalog.templates(kind) {
                assert!(item.sets >= 1, "{} has zero sets", item.name);
            }
        }
    }
}
