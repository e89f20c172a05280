//! HTTP server bootstrap.

use std::sync::Arc;

use crate::api::router::api_router;
use crate::api::types::ApiContext;
use crate::patients::PatientDirectory;
use crate::pipeline::generate::DraftGenerator;
use crate::pipeline::ollama::OllamaClient;
use crate::pipeline::QueryPipeline;
use crate::store::QueryStore;
use crate::{config, db};

/// Wire the directory, generator, store, and pipeline together.
///
/// The draft model is optional: when Ollama (or the configured model) is not
/// reachable at startup, drafting degrades to scenario answers plus the
/// fallback text instead of refusing to start.
pub fn build_context() -> Result<ApiContext, db::DatabaseError> {
    let store = Arc::new(QueryStore::open(&config::database_path())?);
    let patients = Arc::new(PatientDirectory::seeded());

    let model = OllamaClient::from_config();
    let generator =
        DraftGenerator::new(model.map(|m| Box::new(m) as Box<dyn crate::pipeline::generate::DraftModel>));

    let pipeline = Arc::new(QueryPipeline::new(
        Arc::clone(&patients),
        generator,
        Arc::clone(&store),
    ));
    Ok(ApiContext::new(pipeline, store, patients))
}

/// Bind and serve until the process is stopped.
pub async fn serve(ctx: ApiContext) -> std::io::Result<()> {
    let addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "API listening");
    axum::serve(listener, api_router(ctx)).await
}
