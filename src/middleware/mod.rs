use ::actix_session::Session;
use ::actix_web_lab::middleware::Next;
use ::aw::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    HttpMessage,
};
use ::log::warn;

use crate::flash::Flash;

/// Снимает с сессии отложенный flash и кладёт его в extensions запроса,
/// откуда его забирает `AppTpl`.
pub async fn flash(
    session: Session,
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, ::aw::Error> {
    match Flash::take(&session) {
        Ok(flash) if !flash.is_empty() => {
            req.extensions_mut().insert(flash);
        }
        Ok(_) => {}
        Err(e) => warn!("dropping unreadable flash: {}", e),
    }

    next.call(req).await
}
