use actix_web::{web, App, HttpServer};
use cardyear::config::AppConfig;
use cardyear::infra::state::build_state;
use cardyear::middleware::{cors_middleware, RequestTrace};
use cardyear::routes;
use cardyear::telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Configuration comes from the environment; see AppConfig::from_env for the variables.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    telemetry::init_tracing(config.log_format);

    let app_state = match build_state().with_config(&config).and_then(|b| b.build()) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        host = %config.host,
        port = config.port,
        card_source = %config.card_source.base_url,
        max_attempts = config.card_source.max_attempts,
        "Starting card-year backend"
    );

    let data = web::Data::new(app_state);
    let origins = config.cors_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
            .default_service(web::to(routes::not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
