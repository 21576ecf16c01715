use actix_web::{web, App, HttpServer};
use bookshelf::config::app::{load_dotenv, AppConfig};
use bookshelf::infra::state::build_state;
use bookshelf::middleware::cors::cors_middleware;
use bookshelf::middleware::request_trace::RequestTrace;
use bookshelf::middleware::structured_logger::StructuredLogger;
use bookshelf::middleware::trace_span::TraceSpan;
use bookshelf::routes;
use bookshelf::state::security_config::SecurityConfig;
use bookshelf::telemetry;
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let env_file = load_dotenv();
    telemetry::init_tracing();
    if let Some(path) = env_file {
        info!(path = %path.display(), "loaded environment file");
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let security_config = match SecurityConfig::new(config.jwt_secret.as_bytes()) {
        Ok(security_config) => security_config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let app_state = match build_state(security_config)
        .with_db(config.database_url.clone())
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    info!(host = %config.host, port = config.port, "Starting bookshelf backend");

    let data = web::Data::new(app_state);

    // Last wrap runs first: CORS, StructuredLogger, RequestTrace, TraceSpan
    HttpServer::new(move || {
        App::new()
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .wrap(StructuredLogger)
            .wrap(cors_middleware())
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
