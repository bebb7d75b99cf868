use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    services::{
        document_service::{PdfTextExtractor, TextExtractor, UploadStore},
        model_gateway::{AnthropicGateway, ModelGateway},
        quiz_orchestrator::QuizOrchestrator,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<QuizOrchestrator>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wires the production services: the Anthropic gateway and the PDF extractor.
    pub fn new(config: Config) -> AppResult<Self> {
        let gateway = Arc::new(AnthropicGateway::from_config(&config)?);
        log::info!("Model gateway ready (model {})", gateway.model());
        Self::with_services(config, gateway, Arc::new(PdfTextExtractor))
    }

    pub fn with_services(
        config: Config,
        gateway: Arc<dyn ModelGateway>,
        extractor: Arc<dyn TextExtractor>,
    ) -> AppResult<Self> {
        let uploads = UploadStore::new(&config.upload_dir)?;
        let orchestrator = Arc::new(QuizOrchestrator::new(gateway, extractor, uploads));

        Ok(Self {
            orchestrator,
            config: Arc::new(config),
        })
    }
}
