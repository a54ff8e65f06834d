#![allow(dead_code)]

pub use ::aw::{
    cookie::Cookie,
    dev::ServiceResponse,
    http::{header, StatusCode},
    test,
    web::Data,
};
use ::sea_orm::{Database, DbConn, EntityTrait};
use ::tempfile::TempDir;
use migration::{Migrator, MigratorTrait};

use crate::{state::Registry, storage::Uploads};

pub const BOUNDARY: &str = "----archives-test-boundary";

pub enum Part<'a> {
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

impl<'a> Part<'a> {
    pub fn fileku(filename: &'a str, data: &'a [u8]) -> Self {
        Part::File {
            name: "archive[fileku]",
            filename,
            content_type: "text/plain",
            data,
        }
    }
}

pub fn multipart(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = vec![];

    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::File {
                name,
                filename,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}")
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    body
}

pub fn upload_request(parts: &[Part<'_>]) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/archives")
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart(parts))
}

pub struct Ctx {
    pub registry: Data<Registry>,
    // keeps the uploads dir alive for the test
    pub tmp: TempDir,
}

impl Ctx {
    pub async fn new(max_upload_bytes: usize) -> Self {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let tmp = ::tempfile::tempdir().unwrap();
        let uploads = Uploads::open(tmp.path().join("uploads")).await.unwrap();

        Self {
            registry: Data::new(Registry {
                db,
                uploads,
                max_upload_bytes,
            }),
            tmp,
        }
    }

    pub fn db(&self) -> &DbConn {
        &self.registry.db
    }

    pub async fn archives(&self) -> Vec<entity::archive::Model> {
        entity::archive::Entity::find()
            .all(self.db())
            .await
            .unwrap()
    }
}

pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "session")
        .map(|c| c.into_owned())
}

pub fn location<B>(resp: &ServiceResponse<B>) -> Option<String> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}
