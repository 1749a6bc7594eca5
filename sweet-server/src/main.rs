use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpServer, web};

use sweet_server::application::auth_service::AuthService;
use sweet_server::application::sweet_service::SweetService;
use sweet_server::data::sweet_repository::PostgresSweetRepository;
use sweet_server::data::user_repository::PostgresUserRepository;
use sweet_server::infrastructure::config::AppConfig;
use sweet_server::infrastructure::database::{create_pool, run_migrations};
use sweet_server::infrastructure::logging::init_logging;
use sweet_server::infrastructure::security::JwtKeys;
use sweet_server::presentation::handlers;
use sweet_server::presentation::json_error_handler;
use sweet_server::presentation::middleware::RequestLogMiddleware;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_logging();

    let config = AppConfig::from_env().expect("invalid configuration");
    let pool = create_pool(&config.database_url)
        .await
        .expect("failed to connect to database");
    run_migrations(&pool)
        .await
        .expect("failed to run migrations");

    let user_repo = Arc::new(PostgresUserRepository::new(pool.clone()));
    let sweet_repo = Arc::new(PostgresSweetRepository::new(pool.clone()));

    let auth_service = AuthService::new(user_repo, JwtKeys::new(config.jwt_secret.clone()));
    let sweet_service = SweetService::new(sweet_repo);

    let config_data = config.clone();

    HttpServer::new(move || {
        let cors = build_cors(&config_data);
        App::new()
            .wrap(RequestLogMiddleware)
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer"))
                    .add(("Permissions-Policy", "geolocation=()"))
                    .add(("Cross-Origin-Opener-Policy", "same-origin")),
            )
            .wrap(cors)
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(sweet_service.clone()))
            .service(handlers::welcome)
            .service(
                web::scope("/api")
                    .service(handlers::auth::scope())
                    .service(handlers::sweets::scope(auth_service.keys().clone())),
            )
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

fn build_cors(config: &AppConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::AUTHORIZATION,
        ])
        .supports_credentials()
        .max_age(3600);

    for origin in &config.cors_origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}
