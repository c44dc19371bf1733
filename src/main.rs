use clap::Parser;
use course_extractor::config::Config;
use course_extractor::server::{self, AppState, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    course_extractor::logging::init();

    let config = Config::parse();
    log::info!("Starting with {:?}", config);

    let state = AppState::new(&config)?;
    let app = create_router(state, &config.static_dir);
    server::serve(app, config.bind_addr()?).await
}
