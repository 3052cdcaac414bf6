use crate::config::Config;
use crate::history::History;
use crate::inference::{InferenceClient, InferenceError};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub classifier: InferenceClient,
    pub history: Arc<Mutex<History>>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, InferenceError> {
        let classifier = InferenceClient::new(config.predict_url.clone(), config.predict_timeout)?;
        Ok(Self {
            config: Arc::new(config),
            classifier,
            history: Arc::new(Mutex::new(History::default())),
        })
    }
}
