//! Sentence-transformers BERT embedder (candle, CPU).
//!
//! Model files (`config.json`, `tokenizer.json`, weights) come from
//! a local directory when `model_name` names one, otherwise from the
//! Hugging Face hub through the hf-hub cache. Output vectors are the
//! attention-masked mean of the last hidden state, optionally
//! L2-normalized.

use std::fs;
use std::path::{Path, PathBuf};

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use hf_hub::api::sync::ApiBuilder;
use hf_hub::{Repo, RepoType};
use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

use crate::core::config::EmbeddingConfig;
use crate::core::embedding::Embedder;
use crate::core::error::{PdfMemError, Result};

/// Resolved on-disk model artifacts
struct ModelFiles {
    config: PathBuf,
    tokenizer: PathBuf,
    weights: PathBuf,
}

/// BERT sentence embedder
pub struct BertEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    model_name: String,
    dimension: usize,
    normalize: bool,
}

impl BertEmbedder {
    /// Load the model once; every later `embed_batch` reuses it
    ///
    /// # Errors
    ///
    /// `ModelLoadError` if any artifact cannot be fetched or parsed.
    pub fn load(config: &EmbeddingConfig, cache_dir: &Path) -> Result<Self> {
        tracing::info!("Loading embedding model {}", config.model_name);

        let files = resolve_model_files(config, cache_dir)?;

        let config_str = fs::read_to_string(&files.config)
            .map_err(|e| load_error(format!("Failed to read {:?}: {e}", files.config)))?;
        let bert_config: BertConfig = serde_json::from_str(&config_str)
            .map_err(|e| load_error(format!("Failed to parse model config: {e}")))?;
        let dimension = hidden_size(&config_str)?;

        let mut tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| load_error(format!("Failed to load tokenizer: {e}")))?;
        tokenizer.with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::BatchLongest,
            ..Default::default()
        }));
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: config.max_sequence_length,
                ..Default::default()
            }))
            .map_err(|e| load_error(format!("Failed to configure truncation: {e}")))?;

        let device = Device::Cpu;
        let vb = if has_extension(&files.weights, "safetensors") {
            // SAFETY: the weights file is not modified while mapped
            unsafe { VarBuilder::from_mmaped_safetensors(&[&files.weights], DType::F32, &device) }
        } else {
            VarBuilder::from_pth(&files.weights, DType::F32, &device)
        }
        .map_err(|e| load_error(format!("Failed to load model weights: {e}")))?;

        let model = BertModel::load(vb, &bert_config)
            .map_err(|e| load_error(format!("Failed to build BERT model: {e}")))?;

        tracing::info!(
            "Embedding model loaded ({} dimensions)",
            dimension
        );

        Ok(Self {
            model,
            tokenizer,
            device,
            model_name: config.model_name.clone(),
            dimension,
            normalize: config.normalize,
        })
    }

    fn forward(&self, texts: &[&str]) -> candle_core::Result<Vec<Vec<f32>>> {
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(candle_core::Error::msg)?;

        let mut ids = Vec::with_capacity(encodings.len());
        let mut type_ids = Vec::with_capacity(encodings.len());
        let mut masks = Vec::with_capacity(encodings.len());
        for encoding in &encodings {
            ids.push(Tensor::new(encoding.get_ids(), &self.device)?);
            type_ids.push(Tensor::new(encoding.get_type_ids(), &self.device)?);
            masks.push(Tensor::new(encoding.get_attention_mask(), &self.device)?);
        }

        let input_ids = Tensor::stack(&ids, 0)?;
        let token_type_ids = Tensor::stack(&type_ids, 0)?;
        let attention_mask = Tensor::stack(&masks, 0)?;

        // (batch, seq, hidden)
        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;

        // Mean over real tokens only
        let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?.clamp(1e-9f32, f32::MAX)?;
        let mut pooled = summed.broadcast_div(&counts)?;

        if self.normalize {
            let norm = pooled
                .sqr()?
                .sum_keepdim(1)?
                .sqrt()?
                .clamp(1e-12f32, f32::MAX)?;
            pooled = pooled.broadcast_div(&norm)?;
        }

        pooled.to_vec2::<f32>()
    }
}

impl Embedder for BertEmbedder {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.forward(texts)
            .map_err(|e| PdfMemError::EmbeddingFailed(e.to_string()))
    }
}

fn load_error(message: String) -> PdfMemError {
    PdfMemError::ModelLoadError(message)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(ext)
}

/// Embedding width as declared by the model config
fn hidden_size(config_json: &str) -> Result<usize> {
    let value: serde_json::Value = serde_json::from_str(config_json)
        .map_err(|e| load_error(format!("Failed to parse model config: {e}")))?;
    value
        .get("hidden_size")
        .and_then(|v| v.as_u64())
        .map(|v| v as usize)
        .ok_or_else(|| load_error("Model config has no hidden_size".to_string()))
}

fn resolve_model_files(config: &EmbeddingConfig, cache_dir: &Path) -> Result<ModelFiles> {
    let local = Path::new(&config.model_name);
    if local.is_dir() {
        return resolve_local_files(local);
    }

    let api = ApiBuilder::new()
        .with_cache_dir(cache_dir.to_path_buf())
        .with_progress(false)
        .build()
        .map_err(|e| load_error(format!("Failed to initialize HF API: {e}")))?;
    let repo = api.repo(Repo::with_revision(
        config.model_name.clone(),
        RepoType::Model,
        config.revision.clone(),
    ));

    let config_path = repo
        .get("config.json")
        .map_err(|e| load_error(format!("Failed to download config: {e}")))?;
    let tokenizer_path = repo
        .get("tokenizer.json")
        .map_err(|e| load_error(format!("Failed to download tokenizer: {e}")))?;
    let weights_path = repo
        .get("model.safetensors")
        .or_else(|_| repo.get("pytorch_model.bin"))
        .map_err(|e| load_error(format!("Failed to download model weights: {e}")))?;

    Ok(ModelFiles {
        config: config_path,
        tokenizer: tokenizer_path,
        weights: weights_path,
    })
}

fn resolve_local_files(dir: &Path) -> Result<ModelFiles> {
    let require = |name: &str| -> Result<PathBuf> {
        let path = dir.join(name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(load_error(format!("Model directory {dir:?} has no {name}")))
        }
    };

    let config = require("config.json")?;
    let tokenizer = require("tokenizer.json")?;
    let weights = require("model.safetensors").or_else(|_| require("pytorch_model.bin"))?;

    Ok(ModelFiles {
        config,
        tokenizer,
        weights,
    })
}
