pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod openapi;
pub mod schema;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use chrono::FixedOffset;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::{AddressService, CartService, OrderService};
use domain::ports::{AddressRepository, CartRepository, OrderRepository};
use infrastructure::DieselRepository;

pub use config::ServerConfig;
pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    if !applied.is_empty() {
        log::info!("Applied {} database migration(s)", applied.len());
    }
    Ok(())
}

/// The application services, all sharing one repository.
#[derive(Clone)]
pub struct Services {
    pub cart: CartService,
    pub addresses: AddressService,
    pub orders: OrderService,
}

impl Services {
    pub fn new<R>(repo: R, reporting_offset: FixedOffset) -> Self
    where
        R: CartRepository + AddressRepository + OrderRepository,
    {
        let repo = Arc::new(repo);
        Self {
            cart: CartService::new(repo.clone()),
            addresses: AddressService::new(repo.clone()),
            orders: OrderService::new(repo, reporting_offset),
        }
    }
}

/// Registers every route plus the services they depend on.
pub fn configure(cfg: &mut web::ServiceConfig, services: &Services) {
    use handlers::{addresses, cart, orders};

    cfg.app_data(web::JsonConfig::default().error_handler(errors::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(errors::path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(errors::query_error_handler))
        .app_data(web::Data::new(services.cart.clone()))
        .app_data(web::Data::new(services.addresses.clone()))
        .app_data(web::Data::new(services.orders.clone()))
        .service(
            web::scope("/order")
                .route("/addcart", web::post().to(cart::add_to_cart))
                .route("/cartlist/{user_id}", web::get().to(cart::list_cart))
                .route("/cartdelete/{cart_id}", web::delete().to(cart::remove_cart_item))
                .route("/checkout", web::post().to(orders::checkout))
                .route("/all", web::get().to(orders::list_all_orders))
                .route("/list/{user_id}", web::get().to(orders::list_user_orders))
                .route("/cancelled", web::get().to(orders::list_cancelled_orders))
                .route("/update-status", web::post().to(orders::update_status))
                .route("/cancel-order", web::post().to(orders::cancel_order))
                .route("/delete/{order_id}", web::delete().to(orders::delete_order)),
        )
        .service(
            web::scope("/cancelorder")
                .route("/add", web::post().to(orders::add_cancellation))
                .route("/all", web::get().to(orders::list_cancellations))
                .route("/{order_id}", web::delete().to(orders::delete_cancellation)),
        )
        .service(
            web::scope("/users")
                .route("/addresses", web::post().to(addresses::create_address))
                .route("/addresses/{user_id}", web::get().to(addresses::list_addresses)),
        );
}

/// Build and return an actix-web `Server` bound to the configured host and port.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    config: &ServerConfig,
) -> std::io::Result<actix_web::dev::Server> {
    let services = Services::new(DieselRepository::new(pool), config.reporting_offset);
    let openapi = openapi::ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(|cfg| configure(cfg, &services))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind((config.host.clone(), config.port))?
    .run())
}
