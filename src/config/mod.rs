use std::env;
use std::path::PathBuf;

use crate::model::ModelPaths;

const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    // Pre-fetched model artifacts on local disk
    pub model_path: PathBuf,
    pub vectorizer_path: PathBuf,

    // Optional page assets (home.css / home.js)
    pub assets_dir: PathBuf,

    pub max_body_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .map_err(|e| anyhow::anyhow!("PORT is not a valid port: {e}"))?,

            model_path: env::var("MODEL_PATH")
                .unwrap_or_else(|_| "model.json".into())
                .into(),
            vectorizer_path: env::var("VECTORIZER_PATH")
                .unwrap_or_else(|_| "vectorizer.json".into())
                .into(),

            assets_dir: env::var("ASSETS_DIR").unwrap_or_else(|_| ".".into()).into(),

            max_body_bytes: match env::var("MAX_BODY_BYTES") {
                Ok(raw) => raw
                    .parse()
                    .map_err(|e| anyhow::anyhow!("MAX_BODY_BYTES is not a byte count: {e}"))?,
                Err(_) => DEFAULT_MAX_BODY_BYTES,
            },
        })
    }

    pub fn model_paths(&self) -> ModelPaths {
        ModelPaths {
            model: self.model_path.clone(),
            vectorizer: self.vectorizer_path.clone(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            model_path: "model.json".into(),
            vectorizer_path: "vectorizer.json".into(),
            assets_dir: ".".into(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}
