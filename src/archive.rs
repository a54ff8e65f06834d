use std::io;

use ::actix_multipart::MultipartError;
use ::actix_session::SessionInsertError;
use ::askama_actix::Template;
use ::aw::{
    body::BoxBody,
    error::UrlencodedError,
    http::{header, StatusCode},
    HttpResponse, ResponseError,
};
use ::log::{error, info};
use ::sea_orm::{ActiveModelTrait, ActiveValue, DbConn, DbErr, EntityTrait, QueryOrder};

use crate::{
    handlers::ErrorTpl,
    params::{ArchiveParams, UploadedFile},
    state::Registry,
    storage::{sanitize_filename, Uploads},
};
use entity::archive;

pub const NOTICE_CREATED: &str = "File upload successfully";
pub const NOTICE_FAILED: &str = "File upload failed!";

/// Ошибки, прерывающие запрос целиком (в отличие от [`Rejection`]).
#[derive(Debug, ::thiserror::Error)]
pub enum ArchiveError {
    #[error("param is missing or the value is empty: {0}")]
    MissingParameter(&'static str),
    #[error("malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),
    #[error("malformed urlencoded body: {0}")]
    Form(#[from] UrlencodedError),
    #[error("Db Connection error: {0}")]
    DbErr(#[from] DbErr),
    #[error("failed to store flash: {0}")]
    Session(#[from] SessionInsertError),
}

impl ResponseError for ArchiveError {
    fn status_code(&self) -> StatusCode {
        match self {
            ArchiveError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            ArchiveError::Multipart(_) => StatusCode::BAD_REQUEST,
            ArchiveError::Form(_) => StatusCode::BAD_REQUEST,
            ArchiveError::DbErr(_) => StatusCode::SERVICE_UNAVAILABLE,
            ArchiveError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        error!("{:?}", &self);

        let status_code = self.status_code();
        let page = ErrorTpl {
            status_code: status_code.as_u16(),
            message: self.to_string(),
        };

        match page.render() {
            Ok(body) => HttpResponse::build(status_code)
                .insert_header((header::CONTENT_TYPE, "text/html; charset=utf-8"))
                .body(body),
            Err(e) => {
                error!("failed to render error page: {}", e);
                HttpResponse::build(status_code).body(self.to_string())
            }
        }
    }
}

/// Причина, по которой архив не был сохранён. Клиенту не показывается.
#[derive(Debug, ::thiserror::Error)]
pub enum Rejection {
    #[error("`fileku` is missing")]
    MissingFile,
    #[error("uploaded file is empty")]
    EmptyFile,
    #[error("uploaded file has {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },
    #[error("storage error: {0}")]
    Storage(#[from] io::Error),
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

/// атрибуты, из которых строится новый архив
#[derive(Debug, Clone, Default)]
pub struct NewArchive {
    pub fileku: Option<UploadedFile>,
}

impl From<ArchiveParams> for NewArchive {
    fn from(params: ArchiveParams) -> Self {
        Self {
            fileku: params.fileku,
        }
    }
}

/// Хранилище архивов: строки в БД, содержимое файлов в [`Uploads`].
pub struct ArchiveStore<'a> {
    db: &'a DbConn,
    uploads: &'a Uploads,
    max_upload_bytes: usize,
}

impl<'a> ArchiveStore<'a> {
    pub fn new(reg: &'a Registry) -> Self {
        Self {
            db: &reg.db,
            uploads: &reg.uploads,
            max_upload_bytes: reg.max_upload_bytes,
        }
    }

    pub async fn list_all(&self) -> Result<Vec<archive::Model>, DbErr> {
        archive::Entity::find()
            .order_by_asc(archive::Column::Id)
            .all(self.db)
            .await
    }

    /// сохраняет архив целиком или не сохраняет ничего
    pub async fn insert(&self, new: NewArchive) -> Result<archive::Model, Rejection> {
        let file = new.fileku.ok_or(Rejection::MissingFile)?;

        if file.size == 0 {
            return Err(Rejection::EmptyFile);
        }
        if file.size > self.max_upload_bytes {
            return Err(Rejection::TooLarge {
                size: file.size,
                limit: self.max_upload_bytes,
            });
        }

        let filename = sanitize_filename(&file.filename);
        let key = self.uploads.store(&filename, &file.data).await?;

        let row = archive::ActiveModel {
            fileku: ActiveValue::Set(key.clone()),
            filename: ActiveValue::Set(filename),
            content_type: ActiveValue::Set(file.content_type),
            byte_size: ActiveValue::Set(file.size as i64),
            ..Default::default()
        };

        match row.insert(self.db).await {
            Ok(archive) => {
                info!(
                    "archive #{} created: `{}` ({} bytes)",
                    archive.id, archive.fileku, archive.byte_size
                );
                Ok(archive)
            }
            Err(e) => {
                self.uploads.remove(&key).await;
                Err(Rejection::Database(e))
            }
        }
    }
}
