use crate::app::App;
use crate::config::AppConfig;
use crate::responses::error_to_response;
use crate::router::handle;
use astra::Server;
use env_logger::Env;

mod app;
mod config;
mod crawler;
mod errors;
mod forms;
mod handlers;
mod leads;
mod places;
mod responses;
mod router;
mod session;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    // 1️⃣ Environment and logging
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ {e}");
            std::process::exit(1);
        }
    };

    if config.api_key.is_none() {
        log::info!("GOOGLE_PLACES_API_KEY not set, the key must be entered in the UI");
    }

    let addr = config.addr;
    let workers = config.workers;

    // 2️⃣ HTTP clients for the Places API and website crawling
    let app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("❌ Startup failed: {e}");
            std::process::exit(1);
        }
    };

    // 3️⃣ Start the server
    log::info!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(workers);

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        log::error!("Server ended with error: {e}");
    }

    log::info!("Server shut down cleanly.");
}
