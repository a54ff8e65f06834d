use ::sea_orm::{entity::prelude::*, ActiveValue};
use ::serde::{Deserialize, Serialize};

pub mod prelude;

pub mod archive;

fn now() -> ::chrono::NaiveDateTime {
    ::chrono::Utc::now().naive_utc()
}
