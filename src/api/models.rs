use crate::classifier::ClassifierService;
use crate::nutrition::{Biometrics, CholesterolLevel, IntakeSuggestion, NutritionRecord, NutritionTable};
use crate::storage::UploadStore;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<ClassifierService>,
    pub nutrition: Arc<NutritionTable>,
    pub uploads: Arc<UploadStore>,
}

/// Biometric fields shared by the analyze form and the intake endpoint
#[derive(Debug, Deserialize)]
pub struct BiometricsRequest {
    pub height: f64,
    pub weight: f64,

    #[serde(default)]
    pub cholesterol: String,
}

impl BiometricsRequest {
    /// Validate the request
    pub fn validate(&self) -> Result<(), String> {
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err("Height must be a positive number of centimeters".to_string());
        }
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err("Weight must be a positive number of kilograms".to_string());
        }
        Ok(())
    }

    pub fn to_biometrics(&self) -> Biometrics {
        Biometrics {
            height_cm: self.height,
            weight_kg: self.weight,
            cholesterol: CholesterolLevel::parse(&self.cholesterol),
        }
    }
}

/// Macro breakdown of a matched record, shaped for client-side charts
#[derive(Debug, Serialize)]
pub struct MacroChart {
    pub protein: f32,
    pub carbs: f32,
    pub fat: f32,
}

impl MacroChart {
    pub fn from_record(record: &NutritionRecord) -> Self {
        Self {
            protein: record.protein,
            carbs: record.carbs,
            fat: record.fat,
        }
    }
}

/// Response from the analyze endpoint
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub food_name: String,
    pub confidence: f32,
    pub nutrition: Option<NutritionRecord>,
    pub macro_chart: Option<MacroChart>,
    pub suggestion: IntakeSuggestion,
    pub bmi: f64,
    pub image_url: String,
}

/// Response from the intake endpoint
#[derive(Debug, Serialize)]
pub struct IntakeResponse {
    pub suggestion: IntakeSuggestion,
    pub bmi: f64,
}

/// Response from the direct nutrition lookup
#[derive(Debug, Serialize)]
pub struct NutritionResponse {
    pub food_name: String,
    pub nutrition: NutritionRecord,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub known_foods: usize,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorResponse {
            error: status.to_string(),
            message,
        }))
        .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(height: f64, weight: f64) -> BiometricsRequest {
        BiometricsRequest {
            height,
            weight,
            cholesterol: "normal".to_string(),
        }
    }

    #[test]
    fn positive_biometrics_validate() {
        assert!(request(170.0, 70.0).validate().is_ok());
    }

    #[test]
    fn non_positive_biometrics_rejected() {
        assert!(request(0.0, 70.0).validate().is_err());
        assert!(request(-170.0, 70.0).validate().is_err());
        assert!(request(170.0, 0.0).validate().is_err());
        assert!(request(170.0, -1.0).validate().is_err());
    }

    #[test]
    fn non_finite_biometrics_rejected() {
        assert!(request(f64::NAN, 70.0).validate().is_err());
        assert!(request(170.0, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn missing_cholesterol_field_defaults_to_normal() {
        let req: BiometricsRequest =
            serde_json::from_str(r#"{"height": 170, "weight": 70}"#).unwrap();
        assert_eq!(req.to_biometrics().cholesterol, CholesterolLevel::Normal);
    }

    #[test]
    fn absent_nutrition_serializes_as_null() {
        let response = AnalyzeResponse {
            food_name: "sushi".to_string(),
            confidence: 0.9,
            nutrition: None,
            macro_chart: None,
            suggestion: IntakeSuggestion { calories: 1750, protein: 84, carbs: 218, fat: 70 },
            bmi: 24.2,
            image_url: "/uploads/sushi.jpg".to_string(),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert!(value["nutrition"].is_null());
        assert!(value["macro_chart"].is_null());
        assert_eq!(value["suggestion"]["calories"], 1750);
    }
}
