//! Next-load recommendation for logged lifts.
//!
//! A three-branch linear progression over the best logged weight and the
//! average perceived exertion of the aggregation window.

/// Increment applied when the average RPE is at or below the easy ceiling
const EASY_INCREMENT_KG: f64 = 2.5;

/// Increment applied when the average RPE is at or below the moderate ceiling
const MODERATE_INCREMENT_KG: f64 = 1.0;

const EASY_RPE_CEILING: f64 = 7.0;
const MODERATE_RPE_CEILING: f64 = 8.5;

/// Recommend the next working weight from the best logged weight and the
/// average RPE.
///
/// Rules:
/// 1. No best weight recorded (`best_kg <= 0`): no recommendation, returns 0
/// 2. Average RPE at most 7.0: add 2.5 kg
/// 3. Average RPE at most 8.5: add 1.0 kg
/// 4. Otherwise: repeat the current weight
///
/// Negative inputs are clamped to 0. Note that an exercise with no RPE
/// entries averages to 0, which lands in the low-RPE branch: "no RPE data"
/// and "easy week" produce the same +2.5 kg recommendation. Callers that
/// need to distinguish the two must do so upstream.
pub fn recommend_next_load(best_kg: f64, avg_rpe: f64) -> f64 {
    let best_kg = best_kg.max(0.0);
    let avg_rpe = avg_rpe.max(0.0);

    if best_kg <= 0.0 {
        0.0
    } else if avg_rpe <= EASY_RPE_CEILING {
        best_kg + EASY_INCREMENT_KG
    } else if avg_rpe <= MODERATE_RPE_CEILING {
        best_kg + MODERATE_INCREMENT_KG
    } else {
        best_kg
    }
}
