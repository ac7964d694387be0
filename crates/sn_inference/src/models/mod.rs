use std::sync::Arc;

use sn_core::{CompletionModel, Error, Result};

use crate::Config;

pub mod dummy;
pub mod groq;

pub use dummy::DummyModel;
pub use groq::GroqModel;

/// Instantiate a completion backend by its CLI name.
pub fn create_model(name: &str, config: &Config) -> Result<Arc<dyn CompletionModel>> {
    match name {
        "groq" => Ok(Arc::new(GroqModel::new(config)?)),
        "dummy" => Ok(Arc::new(DummyModel)),
        other => Err(Error::InvalidInput(format!("unknown model: {}", other))),
    }
}
