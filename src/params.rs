use std::{future::Future, pin::Pin};

use ::actix_multipart::{Field, Multipart};
use ::aw::{dev::UrlEncoded, web::Data, FromRequest, HttpMessage, HttpRequest};
use ::futures::TryStreamExt;
use ::log::{debug, trace};

use crate::{archive::ArchiveError, config::Config, state::Registry};

/// группа параметров формы, обязательная для `create`
pub const ARCHIVE_GROUP: &str = "archive";
/// единственный разрешённый атрибут группы
pub const FILEKU: &str = "fileku";

/// файл в том виде, в каком его прислал клиент
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    /// хранится не больше `limit + 1` байт, настоящая длина в `size`
    pub data: Vec<u8>,
    pub size: usize,
}

/// разрешённая часть группы `archive[...]`: всё, кроме `fileku`, отбрасывается
#[derive(Debug, Clone, Default)]
pub struct ArchiveParams {
    pub fileku: Option<UploadedFile>,
}

/// разбирает имя вида `group[attr]`
pub fn split_param(name: &str) -> Option<(&str, &str)> {
    let (group, rest) = name.split_once('[')?;
    let attr = rest.strip_suffix(']')?;
    if group.is_empty() || attr.is_empty() || attr.contains(['[', ']']) {
        return None;
    }
    Some((group, attr))
}

impl ArchiveParams {
    /// читает multipart-тело целиком; без единой части `archive[...]` запрос отклоняется
    pub async fn from_multipart(
        mut multipart: Multipart,
        limit: usize,
    ) -> Result<Self, ArchiveError> {
        let mut has_group = false;
        let mut params = Self::default();

        while let Some(field) = multipart.try_next().await? {
            let name = field
                .content_disposition()
                .get_name()
                .unwrap_or_default()
                .to_owned();

            match split_param(&name) {
                Some((ARCHIVE_GROUP, FILEKU)) => {
                    let filename = field
                        .content_disposition()
                        .get_filename()
                        .map(str::to_owned);

                    match filename {
                        // пустое поле выбора файла
                        Some(filename) if filename.is_empty() => drain(field).await?,
                        Some(filename) => {
                            has_group = true;
                            params.fileku = Some(read_file(field, filename, limit).await?);
                        }
                        None => {
                            has_group = true;
                            debug!("`{}` sent as a plain value, not a file", FILEKU);
                            drain(field).await?;
                        }
                    }
                }
                Some((ARCHIVE_GROUP, attr)) => {
                    has_group = true;
                    debug!("unpermitted parameter `{}` dropped", attr);
                    drain(field).await?;
                }
                _ => {
                    trace!("ignore form field `{}`", name);
                    drain(field).await?;
                }
            }
        }

        if !has_group {
            return Err(ArchiveError::MissingParameter(ARCHIVE_GROUP));
        }

        Ok(params)
    }

    /// urlencoded-форма файла не несёт, но группа `archive` в ней быть может
    pub fn from_form(pairs: &[(String, String)]) -> Result<Self, ArchiveError> {
        let mut has_group = false;

        for (name, _) in pairs {
            match split_param(name) {
                Some((ARCHIVE_GROUP, FILEKU)) => {
                    has_group = true;
                    debug!("`{}` sent in a urlencoded form, not as a file", FILEKU);
                }
                Some((ARCHIVE_GROUP, attr)) => {
                    has_group = true;
                    debug!("unpermitted parameter `{}` dropped", attr);
                }
                _ => trace!("ignore form field `{}`", name),
            }
        }

        if !has_group {
            return Err(ArchiveError::MissingParameter(ARCHIVE_GROUP));
        }

        Ok(Self::default())
    }
}

/// сколько байт очередного куска ещё помещается в буфер размером `limit + 1`
fn keep_len(kept: usize, limit: usize, chunk: usize) -> usize {
    limit.saturating_add(1).saturating_sub(kept).min(chunk)
}

async fn read_file(
    mut field: Field,
    filename: String,
    limit: usize,
) -> Result<UploadedFile, ArchiveError> {
    let content_type = field
        .content_type()
        .map(|mime| mime.essence_str().to_owned())
        .unwrap_or_else(|| String::from("application/octet-stream"));

    let mut data = vec![];
    let mut size = 0;

    while let Some(chunk) = field.try_next().await? {
        size += chunk.len();
        let keep = keep_len(data.len(), limit, chunk.len());
        data.extend_from_slice(&chunk[..keep]);
    }

    Ok(UploadedFile {
        filename,
        content_type,
        data,
        size,
    })
}

async fn drain(mut field: Field) -> Result<(), ArchiveError> {
    while field.try_next().await?.is_some() {}
    Ok(())
}

impl FromRequest for ArchiveParams {
    type Error = ArchiveError;

    type Future = Pin<Box<dyn Future<Output = Result<ArchiveParams, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut ::aw::dev::Payload) -> Self::Future {
        let limit = req
            .app_data::<Data<Registry>>()
            .map(|reg| reg.max_upload_bytes)
            .unwrap_or(Config::DEFAULT_MAX_UPLOAD_BYTES);

        let content_type = req.content_type();

        if content_type.eq_ignore_ascii_case("multipart/form-data") {
            let multipart = Multipart::new(req.headers(), payload.take());
            return Box::pin(async move { ArchiveParams::from_multipart(multipart, limit).await });
        }

        if content_type.eq_ignore_ascii_case("application/x-www-form-urlencoded") {
            let form = UrlEncoded::<Vec<(String, String)>>::new(req, payload);
            return Box::pin(async move {
                let pairs = form.await?;
                ArchiveParams::from_form(&pairs)
            });
        }

        // в остальных телах группы `archive` нет
        trace!("unsupported body: `{}`", content_type);
        Box::pin(std::future::ready(Err(ArchiveError::MissingParameter(
            ARCHIVE_GROUP,
        ))))
    }
}
