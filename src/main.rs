use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lungisa::config::Settings;
use lungisa::database::connection;
use lungisa::database::donations::{DonationStore, PgDonationStore};
use lungisa::models::user::User;
use lungisa::routes;
use lungisa::services::auth::AuthService;
use lungisa::services::payfast::PayFastClient;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::new().context("Failed to load configuration")?;

    let pool = connection::init_pool(&settings.database)
        .await
        .context("Failed to connect to database")?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    User::ensure_bootstrap_admin(&pool, &settings.auth)
        .await
        .context("Failed to seed bootstrap admin")?;

    let donation_store: Arc<dyn DonationStore> = Arc::new(PgDonationStore::new(pool.clone()));
    let donation_store = web::Data::from(donation_store);
    let auth_service = web::Data::new(AuthService::new(&settings.auth));
    let payfast = web::Data::new(PayFastClient::new(settings.payfast.clone()));
    let server_settings = web::Data::new(settings.server.clone());
    let pool = web::Data::new(pool);

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let allowed_origin = settings.server.allowed_origin.clone();
    info!("Starting server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = match &allowed_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allow_any_method()
                .allow_any_header(),
            None => Cors::permissive(),
        };

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(pool.clone())
            .app_data(donation_store.clone())
            .app_data(auth_service.clone())
            .app_data(payfast.clone())
            .app_data(server_settings.clone())
            .service(web::scope("/api").configure(routes::api::scoped_config))
    })
    .bind((host, port))?
    .run()
    .await?;

    Ok(())
}
