//! CLI `models` command — list the remote model catalog.

use anyhow::{bail, Context, Result};

use crate::config::BondConfig;
use crate::llm::GeminiClient;

/// Print every model name the API key can see.
pub async fn models(config: &BondConfig) -> Result<()> {
    let Some(client) = GeminiClient::from_config(&config.gemini)
        .context("failed to build Gemini client")?
    else {
        bail!("GEMINI_API_KEY not set. Set it in the environment or config file and retry.");
    };

    println!("Listing available models (this may take a moment)...");
    let names = client.list_model_names().await;
    if names.is_empty() {
        println!("No models returned. Check your API key or network access.");
        return Ok(());
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}
