use ::sea_orm::DbConn;

use crate::storage::Uploads;

#[derive(Debug, Clone)]
pub struct Registry {
    pub db: DbConn,
    pub uploads: Uploads,
    /// предельный размер одного загружаемого файла
    pub max_upload_bytes: usize,
}
