pub mod intake;
pub mod table;

pub use intake::{body_mass_index, suggest_intake, Biometrics, CholesterolLevel, IntakeSuggestion};
pub use table::{NutritionRecord, NutritionTable};
