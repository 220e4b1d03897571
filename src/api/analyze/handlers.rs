use crate::api::models::*;
use crate::classifier::ClassifierError;
use crate::nutrition::{body_mass_index, suggest_intake};
use crate::storage::UploadError;
use axum::{extract::Multipart, extract::State, Json};
use tracing::info;

/// Analyze an uploaded food photo together with biometric form fields.
///
/// Multipart fields: `image` (file), `height`, `weight`, `cholesterol`.
/// A food the classifier names but the table does not know is reported
/// with `nutrition: null`, not an error.
pub async fn analyze_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut image: Option<(String, Vec<u8>)> = None;
    let mut height = None;
    let mut weight = None;
    let mut cholesterol = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image") => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| AppError::BadRequest("Image field must be a file upload".to_string()))?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Could not read image field: {}", e)))?;
                image = Some((filename, bytes.to_vec()));
            }
            Some("height") => height = Some(read_text(field, "height").await?),
            Some("weight") => weight = Some(read_text(field, "weight").await?),
            Some("cholesterol") => cholesterol = read_text(field, "cholesterol").await?,
            _ => {}
        }
    }

    let (filename, bytes) = image
        .ok_or_else(|| AppError::BadRequest("Missing image field".to_string()))?;
    if bytes.is_empty() {
        return Err(AppError::BadRequest("Uploaded image is empty".to_string()));
    }

    let request = BiometricsRequest {
        height: parse_number(height, "height")?,
        weight: parse_number(weight, "weight")?,
        cholesterol,
    };

    // Validate
    request.validate().map_err(AppError::BadRequest)?;

    info!(filename = %filename, size = bytes.len(), "Analyzing upload");

    // Classify
    let prediction = state.classifier.predict(&bytes).map_err(|e| match e {
        ClassifierError::Decode(_) => AppError::BadRequest(format!("Unreadable image: {}", e)),
        ClassifierError::Inference(_)
        | ClassifierError::EmptyOutput
        | ClassifierError::UnknownClass(_) => {
            AppError::Internal(format!("Classification failed: {}", e))
        }
    })?;

    info!(
        label = %prediction.label,
        confidence = prediction.confidence,
        "Classifier prediction"
    );

    // Store only once the photo classified; a rejected request must not
    // leave a file behind under /uploads
    let stored_name = state.uploads.save(&filename, &bytes).map_err(|e| match e {
        UploadError::InvalidName(_) => AppError::BadRequest(e.to_string()),
        UploadError::Io(_) => AppError::Internal(format!("Could not store upload: {}", e)),
    })?;

    // Look up nutrition facts; a miss is a normal outcome
    let nutrition = state.nutrition.lookup(&prediction.label).copied();
    if nutrition.is_none() {
        info!(label = %prediction.label, "No nutrition facts for predicted food");
    }

    // Suggest intake
    let biometrics = request.to_biometrics();
    let suggestion = suggest_intake(&biometrics);
    let bmi = body_mass_index(biometrics.height_cm, biometrics.weight_kg);

    Ok(Json(AnalyzeResponse {
        food_name: prediction.label,
        confidence: prediction.confidence,
        macro_chart: nutrition.as_ref().map(MacroChart::from_record),
        nutrition,
        suggestion,
        bmi,
        image_url: format!("/uploads/{}", stored_name),
    }))
}

async fn read_text(field: axum::extract::multipart::Field<'_>, name: &str) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Could not read {} field: {}", name, e)))
}

fn parse_number(value: Option<String>, name: &str) -> Result<f64, AppError> {
    let raw = value.ok_or_else(|| AppError::BadRequest(format!("Missing {} field", name)))?;
    raw.trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("{} must be a number, got {:?}", name, raw)))
}
