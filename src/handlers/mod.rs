use std::future::Ready;

use ::actix_session::Session;
use ::actix_web_lab::middleware::from_fn;
use ::askama_actix::Template;
use ::aw::{
    http::StatusCode,
    web::{self, Data, Redirect},
    FromRequest, HttpMessage, HttpRequest, HttpResponse, Responder,
};
use ::log::warn;

use crate::{
    archive::{ArchiveError, ArchiveStore, NOTICE_CREATED, NOTICE_FAILED},
    flash::Flash,
    middleware,
    params::ArchiveParams,
    state::*,
};

mod archives;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(archives::index))
            .wrap(from_fn(middleware::flash)),
    );
    cfg.service(
        web::scope("/archives")
            .configure(archives::config)
            .wrap(from_fn(middleware::flash)),
    );
}

/// общая информация которая будет передана шаблонам для рендеринга
#[derive(Clone)]
pub struct AppTpl {
    /// сообщение, оставленное предыдущим запросом
    pub flash: Flash,
}

impl FromRequest for AppTpl {
    type Error = ::aw::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut ::aw::dev::Payload) -> Self::Future {
        std::future::ready({
            let flash = req.extensions().get::<Flash>().cloned().unwrap_or_default();
            Ok(Self { flash })
        })
    }
}

#[derive(Clone, Template)]
#[template(path = "error.html")]
pub struct ErrorTpl {
    pub status_code: u16,
    pub message: String,
}
