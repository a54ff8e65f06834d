use ::actix_session::{Session, SessionGetError, SessionInsertError};
use ::serde::{Deserialize, Serialize};

const FLASH_KEY: &str = "flash";

/// Сообщение, которое переживает ровно один редирект: кладётся в сессию
/// обработчиком и забирается из неё при следующем запросе.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub notice: Option<String>,
}

impl Flash {
    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            notice: Some(message.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.notice.is_none()
    }

    /// заменяет то, что уже ждало в сессии
    pub fn store(&self, session: &Session) -> Result<(), SessionInsertError> {
        session.insert(FLASH_KEY, self)
    }

    /// забирает flash из сессии; нечитаемый тоже удаляется
    pub fn take(session: &Session) -> Result<Self, SessionGetError> {
        let flash = session.get::<Self>(FLASH_KEY);
        if !matches!(flash, Ok(None)) {
            session.remove(FLASH_KEY);
        }
        Ok(flash?.unwrap_or_default())
    }
}
