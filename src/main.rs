use actix_cors::Cors;
use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

mod config;
mod controllers;
mod db;
mod export;
mod models;
mod reminders;
mod search;

use config::Config;
use db::Database;

pub struct AppState {
    pub db: Arc<Database>,
    pub config: Config,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let port = config.port;

    log::info!("CPHS backend v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Initializing database at {}", config.database_url);
    let db = Arc::new(Database::new(&config.database_url).expect("Failed to initialize database"));

    // Serve the static form frontend only if the directory exists
    let public_dir = config::public_dir();
    let serve_public = std::path::Path::new(&public_dir).exists();
    if serve_public {
        log::info!("Serving static frontend from {}", public_dir);
    }

    log::info!("Listening on 0.0.0.0:{}", port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        let mut app = App::new()
            .app_data(web::Data::new(AppState {
                db: Arc::clone(&db),
                config: config.clone(),
            }))
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config_routes)
            .configure(controllers::counter::config)
            .configure(controllers::investigations::config);

        if serve_public {
            app = app.service(Files::new("/", public_dir.clone()).index_file("index.html"));
        }

        app
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
