use anyhow::Context;
use image::imageops::FilterType;
use image::GenericImageView;
use std::path::Path;
use thiserror::Error;
use tract_onnx::prelude::*;
use tracing::info;

type OnnxModel = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

// ImageNet channel statistics, matching the preprocessing the
// pretrained model was trained with.
const MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const STD: [f32; 3] = [0.229, 0.224, 0.225];

/// A single classification outcome.
#[derive(Debug, Clone)]
pub struct Prediction {
    pub label: String,
    pub confidence: f32,
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("inference failed: {0}")]
    Inference(anyhow::Error),

    #[error("model produced no scores")]
    EmptyOutput,

    #[error("predicted class {0} has no label")]
    UnknownClass(usize),
}

impl From<anyhow::Error> for ClassifierError {
    fn from(err: anyhow::Error) -> Self {
        Self::Inference(err)
    }
}

/// Pretrained ONNX image classifier.
///
/// Loads the model and its label list once at startup; inference is
/// read-only and safe to share across requests behind `Arc`.
pub struct ClassifierService {
    model: OnnxModel,
    labels: Vec<String>,
    input_size: usize,
}

impl ClassifierService {
    pub fn new(model_path: &Path, labels_path: &Path, input_size: usize) -> anyhow::Result<Self> {
        let raw_labels = std::fs::read_to_string(labels_path)
            .with_context(|| format!("reading labels from {}", labels_path.display()))?;
        let labels = parse_labels(&raw_labels);
        if labels.is_empty() {
            anyhow::bail!("label file {} is empty", labels_path.display());
        }

        let model = tract_onnx::onnx()
            .model_for_path(model_path)
            .with_context(|| format!("loading model from {}", model_path.display()))?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, 3, input_size, input_size)),
            )?
            .into_optimized()?
            .into_runnable()?;

        info!(labels = labels.len(), input_size, "Classifier model loaded");

        Ok(Self { model, labels, input_size })
    }

    /// Number of classes the model can predict.
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Classify an encoded image (any format the `image` crate can
    /// sniff) and return the best label with its softmax confidence.
    pub fn predict(&self, bytes: &[u8]) -> Result<Prediction, ClassifierError> {
        let img = image::load_from_memory(bytes)?;
        let resized = img.resize_exact(
            self.input_size as u32,
            self.input_size as u32,
            FilterType::CatmullRom,
        );

        let input = tract_ndarray::Array4::from_shape_fn(
            (1, 3, self.input_size, self.input_size),
            |(_, channel, y, x)| {
                let value = resized.get_pixel(x as u32, y as u32)[channel] as f32 / 255.0;
                (value - MEAN[channel]) / STD[channel]
            },
        );

        let outputs = self.model.run(tvec!(Tensor::from(input).into()))?;
        let scores = outputs[0].to_array_view::<f32>()?;

        let (class, confidence) =
            best_class(scores.as_slice().ok_or(ClassifierError::EmptyOutput)?)
                .ok_or(ClassifierError::EmptyOutput)?;

        let label = self
            .labels
            .get(class)
            .ok_or(ClassifierError::UnknownClass(class))?
            .clone();

        Ok(Prediction { label, confidence })
    }
}

/// One label per line; blank lines and surrounding whitespace ignored.
fn parse_labels(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Argmax over raw scores, with a softmax giving the winner's
/// probability.
fn best_class(scores: &[f32]) -> Option<(usize, f32)> {
    if scores.is_empty() {
        return None;
    }

    let mut best_class = 0;
    let mut best_score = f32::NEG_INFINITY;
    for (i, &score) in scores.iter().enumerate() {
        if score > best_score {
            best_score = score;
            best_class = i;
        }
    }

    let exp_sum: f32 = scores.iter().map(|&s| (s - best_score).exp()).sum();
    Some((best_class, 1.0 / exp_sum))
}
