//! Prints the Gemini models this API key can call `generateContent` on.

use nutriscan::{config::GeminiConfig, vision::GeminiClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    nutriscan::init_tracing();

    let models = GeminiClient::new(GeminiConfig::from_env()?).list_models().await?;
    if models.is_empty() {
        tracing::warn!("no models support generateContent for this key");
    }
    for name in models {
        println!("{name}");
    }
    Ok(())
}
