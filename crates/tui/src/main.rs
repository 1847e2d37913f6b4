use budget_tui::{app::App, config, error::Result, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    logging::init(&config.log_file, &config.log_level)?;
    tracing::info!(base_url = %config.base_url, "starting budget tracker");

    let mut app = App::new(config)?;
    app.run().await?;
    Ok(())
}
