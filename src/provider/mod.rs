use async_trait::async_trait;

use crate::config::Config;
use crate::errors::Result;
use crate::prompt::GenerationPrompt;

pub mod gemini;

/// A text-generation backend. One call is one attempt: implementations never
/// retry and never return partial text.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn generate(&self, prompt: &GenerationPrompt) -> Result<String>;
}

pub type DynProvider = Box<dyn Provider + Send + Sync>;

pub fn make_provider(cfg: &Config) -> Result<DynProvider> {
    let endpoint = cfg.resolved_endpoint()?;
    Ok(Box::new(gemini::GeminiProvider::new(
        endpoint,
        cfg.api_key.clone(),
    )))
}
