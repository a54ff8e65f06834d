use super::*;

use crate::params::{ARCHIVE_GROUP, FILEKU};
use entity::archive;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(index))
            .route(web::post().to(create)),
    );
}

/// пустая форма загрузки нового архива
pub struct ArchiveForm {
    pub action: &'static str,
    pub field: String,
}

impl ArchiveForm {
    pub fn blank() -> Self {
        Self {
            action: "/archives",
            field: format!("{}[{}]", ARCHIVE_GROUP, FILEKU),
        }
    }
}

#[derive(Template)]
#[template(path = "archives/index.html")]
struct ArchivesView {
    app: AppTpl,
    archives: Vec<archive::Model>,
    form: ArchiveForm,
}

pub(super) async fn index(
    reg: Data<Registry>,
    app: AppTpl,
) -> Result<impl Responder, ArchiveError> {
    let archives = ArchiveStore::new(&reg).list_all().await?;

    Ok(ArchivesView {
        app,
        archives,
        form: ArchiveForm::blank(),
    })
}

pub(super) async fn create(
    reg: Data<Registry>,
    req: HttpRequest,
    session: Session,
    params: ArchiveParams,
) -> Result<HttpResponse, ArchiveError> {
    let notice = match ArchiveStore::new(&reg).insert(params.into()).await {
        Ok(_) => NOTICE_CREATED,
        Err(rejection) => {
            warn!("upload rejected: {}", rejection);
            NOTICE_FAILED
        }
    };

    Flash::notice(notice).store(&session)?;

    Ok(Redirect::to("/archives")
        .using_status_code(StatusCode::FOUND)
        .respond_to(&req)
        .map_into_boxed_body())
}
