use dotenvy::dotenv;
use gold_order_service::{build_server, create_pool, run_migrations, ServerConfig};
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = ServerConfig::from_env().map_err(|e| {
        log::error!("Invalid configuration: {e}");
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    let pool = create_pool(&config.database_url, config.pool_max_size).map_err(|e| {
        log::error!("Could not create the database pool: {e}");
        io::Error::new(io::ErrorKind::ConnectionRefused, e)
    })?;
    run_migrations(&pool).map_err(|e| {
        log::error!("Database migrations failed: {e}");
        io::Error::other(e)
    })?;

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(pool, &config)?.await
}
