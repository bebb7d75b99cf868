pub mod document_service;
pub mod model_gateway;
pub mod prompt_builder;
pub mod quiz_orchestrator;
pub mod response_parser;
