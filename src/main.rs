use nutriscan::{app, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    nutriscan::init_tracing();

    let app_state = AppState::init().await?;
    tracing::info!(
        model = %app_state.config.gemini.model,
        embed_meal_data = app_state.config.embed_meal_data,
        "starting nutriscan"
    );

    app::serve(app::build_app(app_state)).await
}
