use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use content_service::config::Config;
use content_service::db::PgPostRepository;
use content_service::handlers;
use content_service::metrics::serve_metrics;
use content_core::PostRepository;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::io;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

struct HealthState {
    db_pool: PgPool,
}

impl HealthState {
    async fn check_postgres(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.db_pool)
            .await
            .map(|_| ())
    }
}

async fn health_summary(state: web::Data<HealthState>) -> HttpResponse {
    match state.check_postgres().await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "content-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "content-service"
        })),
    }
}

async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "alive" }))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    tracing::info!(
        "Starting content-service in {} mode on {}:{}",
        config.app.env,
        config.app.host,
        config.app.port
    );

    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::ConnectionRefused,
                format!("Failed to connect to PostgreSQL: {}", e),
            )
        })?;
    tracing::info!("Connected to PostgreSQL");

    let repo: Arc<dyn PostRepository> = Arc::new(PgPostRepository::new(db_pool.clone()));
    let repo_data = web::Data::new(repo);
    let feed_config = web::Data::new(config.feed.clone());
    let health_state = web::Data::new(HealthState {
        db_pool: db_pool.clone(),
    });

    let bind_addr = (config.app.host.clone(), config.app.port);

    HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(repo_data.clone())
            .app_data(feed_config.clone())
            .app_data(health_state.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/metrics", web::get().to(serve_metrics))
            .route("/api/v1/health", web::get().to(health_summary))
            .route("/api/v1/health/live", web::get().to(liveness_check))
            .service(
                web::scope("/api/v1")
                    .service(web::scope("/feed").route("", web::get().to(handlers::get_feed)))
                    .service(
                        web::scope("/posts")
                            .service(
                                web::resource("")
                                    .route(web::post().to(handlers::create_post)),
                            )
                            .service(
                                web::resource("/user/{user_id}")
                                    .route(web::get().to(handlers::get_user_posts)),
                            )
                            .service(
                                web::resource("/{post_id}")
                                    .route(web::get().to(handlers::get_post))
                                    .route(web::delete().to(handlers::delete_post)),
                            ),
                    ),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
