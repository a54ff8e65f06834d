use super::*;

/// одна загруженная пользователем запись
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "archive")]
pub struct Model {
    #[sea_orm(primary_key, unique)]
    pub id: u32,
    /// ключ файла в хранилище, относительно каталога загрузок
    #[sea_orm(not_null)]
    pub fileku: String,
    /// оригинальное (очищенное) имя файла
    #[sea_orm(not_null)]
    pub filename: String,
    #[sea_orm(default_value = "application/octet-stream", not_null)]
    pub content_type: String,
    #[sea_orm(default_value = "0", not_null)]
    pub byte_size: i64,
    #[sea_orm(default_expr = "Expr::current_timestamp()", not_null)]
    pub created_at: ChronoDateTime,
    #[sea_orm(default_expr = "Expr::current_timestamp()", not_null)]
    pub updated_at: ChronoDateTime,
}

impl Model {
    /// адрес, по которому файл отдаётся клиенту
    pub fn url(&self) -> String {
        format!("/uploads/{}", self.fileku)
    }

    pub fn human_size(&self) -> String {
        const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];

        let mut size = self.byte_size as f64;
        let mut unit = 0;
        while size >= 1024.0 && unit < UNITS.len() - 1 {
            size /= 1024.0;
            unit += 1;
        }

        match unit {
            0 => format!("{} {}", self.byte_size, UNITS[0]),
            _ => format!("{:.1} {}", size, UNITS[unit]),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let reject = || match insert {
            true => Err(DbErr::RecordNotInserted),
            false => Err(DbErr::RecordNotUpdated),
        };

        // below validate fields:

        match &self.fileku {
            ActiveValue::Set(fileku) | ActiveValue::Unchanged(fileku) if !fileku.is_empty() => {}
            _ => {
                ::log::warn!("reject save an archive without `fileku`");
                return reject();
            }
        }

        match &self.filename {
            ActiveValue::Set(filename) | ActiveValue::Unchanged(filename)
                if !filename.is_empty() => {}
            _ => {
                ::log::warn!("reject save an archive without `filename`");
                return reject();
            }
        }

        if insert && self.created_at.is_not_set() {
            self.created_at = ActiveValue::Set(now());
        }

        self.updated_at = ActiveValue::Set(now());

        Ok(self)
    }
}
