use std::sync::Arc;

use crate::patients::PatientDirectory;
use crate::pipeline::QueryPipeline;
use crate::store::QueryStore;

/// Shared state handed to every endpoint handler.
#[derive(Clone)]
pub struct ApiContext {
    pub pipeline: Arc<QueryPipeline>,
    pub store: Arc<QueryStore>,
    pub patients: Arc<PatientDirectory>,
}

impl ApiContext {
    pub fn new(
        pipeline: Arc<QueryPipeline>,
        store: Arc<QueryStore>,
        patients: Arc<PatientDirectory>,
    ) -> Self {
        Self {
            pipeline,
            store,
            patients,
        }
    }
}
