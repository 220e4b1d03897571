use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

const CONFIG_PATH: &str = "config.toml";

/// Application configuration, loaded from `config.toml` with sane
/// defaults when the file or individual keys are absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub classifier: ClassifierConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on request bodies, uploads included.
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub model_path: PathBuf,
    pub labels_path: PathBuf,
    /// Edge length the model expects, e.g. 224 for ViT/MobileNet-class
    /// checkpoints.
    pub input_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub upload_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            classifier: ClassifierConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/food_classifier.onnx"),
            labels_path: PathBuf::from("models/labels.txt"),
            input_size: 224,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("static/uploads"),
        }
    }
}

impl AppConfig {
    /// Load from `config.toml` in the working directory, falling back
    /// to defaults when the file does not exist.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new(CONFIG_PATH))
    }

    fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            warn!("No {} found, using default configuration", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config = toml::from_str(&raw)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.classifier.input_size, 224);
        assert_eq!(config.storage.upload_dir, PathBuf::from("static/uploads"));
    }

    #[test]
    fn partial_config_keeps_defaults_elsewhere() {
        let config: AppConfig = toml::from_str("[server]\nport = 9090\n").unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.classifier.input_size, 224);
    }

    #[test]
    fn full_config_parses() {
        let raw = r#"
            [server]
            host = "127.0.0.1"
            port = 3000
            max_upload_bytes = 1048576

            [classifier]
            model_path = "m.onnx"
            labels_path = "l.txt"
            input_size = 256

            [storage]
            upload_dir = "data/uploads"
        "#;
        let config: AppConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.classifier.input_size, 256);
        assert_eq!(config.storage.upload_dir, PathBuf::from("data/uploads"));
    }
}
