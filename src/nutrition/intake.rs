use serde::Serialize;

/// Cholesterol status reported by the user. Only the exact value
/// "high" selects `High`; anything else is treated as `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CholesterolLevel {
    High,
    Normal,
}

impl CholesterolLevel {
    pub fn parse(raw: &str) -> Self {
        if raw == "high" {
            Self::High
        } else {
            Self::Normal
        }
    }
}

/// Biometric inputs for one intake computation.
///
/// Callers validate before constructing this (height and weight must be
/// positive and finite); the computation itself does not re-check.
#[derive(Debug, Clone, Copy)]
pub struct Biometrics {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub cholesterol: CholesterolLevel,
}

/// Suggested daily intake target. Heuristic, not medical advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntakeSuggestion {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

/// Compute the daily intake target from biometrics.
///
/// calories = floor(25 * weight); protein = floor(weight * 1.2);
/// carbs = half the calories, at 4 kcal per gram; fat is a constant
/// picked by the cholesterol flag alone.
pub fn suggest_intake(biometrics: &Biometrics) -> IntakeSuggestion {
    let base_calories = 25.0 * biometrics.weight_kg;

    let fat = match biometrics.cholesterol {
        CholesterolLevel::High => 50,
        CholesterolLevel::Normal => 70,
    };

    IntakeSuggestion {
        calories: base_calories.floor() as u32,
        protein: (biometrics.weight_kg * 1.2).floor() as u32,
        carbs: (base_calories * 0.5 / 4.0).floor() as u32,
        fat,
    }
}

/// Body-mass index: weight (kg) over squared height (m).
pub fn body_mass_index(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn biometrics(height_cm: f64, weight_kg: f64, cholesterol: &str) -> Biometrics {
        Biometrics {
            height_cm,
            weight_kg,
            cholesterol: CholesterolLevel::parse(cholesterol),
        }
    }

    #[test]
    fn normal_cholesterol_target() {
        let suggestion = suggest_intake(&biometrics(170.0, 70.0, "normal"));
        assert_eq!(
            suggestion,
            IntakeSuggestion { calories: 1750, protein: 84, carbs: 218, fat: 70 }
        );
    }

    #[test]
    fn high_cholesterol_lowers_fat_only() {
        let suggestion = suggest_intake(&biometrics(170.0, 70.0, "high"));
        assert_eq!(
            suggestion,
            IntakeSuggestion { calories: 1750, protein: 84, carbs: 218, fat: 50 }
        );
    }

    #[test]
    fn fat_ignores_height_and_weight() {
        for (height, weight) in [(150.0, 45.0), (170.0, 70.0), (195.0, 120.0)] {
            assert_eq!(suggest_intake(&biometrics(height, weight, "high")).fat, 50);
            assert_eq!(suggest_intake(&biometrics(height, weight, "normal")).fat, 70);
        }
    }

    #[test]
    fn unrecognized_cholesterol_is_normal() {
        assert_eq!(CholesterolLevel::parse("high"), CholesterolLevel::High);
        assert_eq!(CholesterolLevel::parse("normal"), CholesterolLevel::Normal);
        assert_eq!(CholesterolLevel::parse("HIGH"), CholesterolLevel::Normal);
        assert_eq!(CholesterolLevel::parse(""), CholesterolLevel::Normal);
        assert_eq!(CholesterolLevel::parse("borderline"), CholesterolLevel::Normal);
    }

    #[test]
    fn suggestion_is_deterministic() {
        let input = biometrics(182.0, 95.5, "normal");
        assert_eq!(suggest_intake(&input), suggest_intake(&input));
    }

    #[test]
    fn results_are_floored() {
        // 25 * 70.9 = 1772.5; 70.9 * 1.2 = 85.08; 886.25 / 4 = 221.5...
        let suggestion = suggest_intake(&biometrics(170.0, 70.9, "normal"));
        assert_eq!(suggestion.calories, 1772);
        assert_eq!(suggestion.protein, 85);
        assert_eq!(suggestion.carbs, 221);
    }

    #[test]
    fn bmi_of_reference_person() {
        let bmi = body_mass_index(170.0, 70.0);
        assert!((bmi - 24.2214).abs() < 1e-3);
    }
}
