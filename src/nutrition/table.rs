use serde::Serialize;
use std::collections::HashMap;

/// Per-serving nutrition facts for one food label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NutritionRecord {
    pub calories: f32,
    pub protein: f32,
    pub carbs: f32,
    pub fat: f32,
}

/// Fixed label -> nutrition mapping, built once at startup.
///
/// Keys are stored lowercase; lookups normalize case, so "Pizza",
/// "PIZZA" and "pizza" all resolve to the same record. A miss is a
/// normal outcome, not an error.
pub struct NutritionTable {
    records: HashMap<String, NutritionRecord>,
}

impl NutritionTable {
    /// The built-in table of known foods.
    pub fn builtin() -> Self {
        let entries = [
            ("pizza", NutritionRecord { calories: 266.0, protein: 11.0, carbs: 33.0, fat: 10.0 }),
            ("apple", NutritionRecord { calories: 52.0, protein: 0.3, carbs: 14.0, fat: 0.2 }),
            ("burger", NutritionRecord { calories: 295.0, protein: 17.0, carbs: 30.0, fat: 13.0 }),
            ("salad", NutritionRecord { calories: 152.0, protein: 2.9, carbs: 11.0, fat: 11.0 }),
            ("ice cream", NutritionRecord { calories: 207.0, protein: 3.5, carbs: 24.0, fat: 11.0 }),
        ];

        Self {
            records: entries
                .into_iter()
                .map(|(name, record)| (name.to_string(), record))
                .collect(),
        }
    }

    /// Case-insensitive lookup. Total: any string is a valid query.
    pub fn lookup(&self, label: &str) -> Option<&NutritionRecord> {
        self.records.get(&label.to_lowercase())
    }

    /// Number of known foods.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
