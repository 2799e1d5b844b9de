use actix_web::{App, HttpServer, middleware, web};

use campus_portal::AppState;
use campus_portal::config::AppConfig;
use campus_portal::handlers;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env();
    let bind = config.bind.clone();
    match config.today {
        Some(today) => log::info!("Today pinned to {today}"),
        None => log::info!("Today follows the local clock"),
    }
    if !config.failing_sources.is_empty() {
        log::warn!("Simulating load failures for: {}", config.failing_sources.join(", "));
    }

    let state = web::Data::new(AppState::new(config));

    log::info!("Starting server at http://{bind}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(handlers::configure)
    })
    .bind(bind)?
    .run()
    .await
}
