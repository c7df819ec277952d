//! Shared application state and pipeline assembly

use crate::assets::AssetTree;
use crate::config::Config;
use crate::handler::SpaHandler;
use crate::middleware::{CompressionLayer, Pipeline, SecurityHeaders};
use std::sync::Arc;

/// Application state shared by every connection task
pub struct AppState {
    pub config: Config,
    pub pipeline: Pipeline,
}

impl AppState {
    pub fn new(config: Config, tree: Arc<AssetTree>) -> Self {
        let pipeline = build_pipeline(&config, tree);
        Self { config, pipeline }
    }
}

/// Security headers outermost, then compression, then the fallback policy
pub fn build_pipeline(config: &Config, tree: Arc<AssetTree>) -> Pipeline {
    let pipeline = Pipeline::new(Arc::new(SpaHandler::new(tree))).stage(SecurityHeaders);

    if config.compression.enabled {
        pipeline.stage(CompressionLayer::new(config.compression.level))
    } else {
        pipeline
    }
}
