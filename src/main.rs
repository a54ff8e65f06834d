extern crate actix_web as aw;

use ::actix_session::{config::BrowserSession, storage::CookieSessionStore, SessionMiddleware};
use ::aw::{cookie::SameSite, web::Data, HttpServer};

mod session;

use ::dotenvy::dotenv;
use ::log::{info, trace};
use ::sea_orm::{Database, DbErr};
use migration::{Migrator, MigratorTrait};

pub mod archive;
pub mod config;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod params;
pub mod state;
pub mod storage;
use config::{Config, ConfigError};
use state::*;
use storage::Uploads;

macro_rules! app {
    ($uploads_dir:expr) => {
        ::actix_web::App::new()
            .wrap(::actix_web::middleware::Logger::default())
            .service(actix_files::Files::new("/uploads", $uploads_dir).use_last_modified(true))
            .configure(handlers::config)
    };
}

#[derive(Debug, ::thiserror::Error)]
enum StartUpError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("session key error: {0}")]
    SessionKey(#[from] session::SessionKeyError),
    #[error("Database IO error: {0}")]
    DbErr(#[from] DbErr),
    #[error("general IO error: {0}")]
    IO(#[from] std::io::Error),
}

#[actix_web::main]
async fn main() -> Result<(), StartUpError> {
    dotenv().ok();

    env_logger::init();

    trace!("TRACE level enabled");

    let config = Config::from_env()?;
    let key = session::key(config.session_key.as_deref())?;

    let db = Database::connect(config.database_url.as_str()).await?;
    Migrator::up(&db, None).await?;

    let uploads = Uploads::open(&config.uploads_dir).await?;
    let uploads_dir = uploads.root().to_path_buf();

    let registry = Data::new(Registry {
        db,
        uploads,
        max_upload_bytes: config.max_upload_bytes,
    });

    info!(
        "listening on {}:{}, uploads in `{}`",
        config.bind_addr,
        config.port,
        uploads_dir.display()
    );

    let srv = HttpServer::new(move || {
        app!(uploads_dir.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
                    .session_lifecycle(BrowserSession::default())
                    .cookie_name(String::from("session"))
                    .cookie_http_only(true)
                    .cookie_same_site(SameSite::Lax)
                    .build(),
            )
            .app_data(Data::clone(&registry))
    })
    .workers(config.workers)
    .bind((config.bind_addr.as_str(), config.port))?
    .run();

    srv.await?;

    Ok(())
}
