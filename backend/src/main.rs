mod config;
mod db;
mod domain;
mod error;
mod services;

use crate::config::AppConfig;
use crate::db::Database;
use actix_web::{web, App, HttpServer};
use env_logger::{Env, Target};
use log::{error, info};
use std::fs::OpenOptions;
use std::io;
use std::thread;
use std::time::Duration;

fn init_logging(config: &AppConfig) -> io::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(Env::default().default_filter_or(config.log_level.as_str()));
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let config = AppConfig::load().map_err(io::Error::other)?;
    init_logging(&config)?;

    let db = Database::open(&config.database_path, config.seed_demo_data).map_err(|e| {
        error!(
            "Failed to open database {}: {}",
            config.database_path.display(),
            e
        );
        io::Error::other(e)
    })?;

    let url = config.url();
    if config.open_browser {
        let url_clone = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url_clone);
        });
    }

    info!("Server running at {}", url);

    let json_limit = config.json_limit;
    HttpServer::new(move || {
        App::new()
            .app_data(services::api::json_config(json_limit))
            .app_data(web::Data::new(db.clone()))
            .configure(services::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
