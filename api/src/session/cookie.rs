use actix_web::cookie::{Cookie, SameSite};
use actix_web::HttpRequest;
use uuid::Uuid;

use super::store::SESSION_COOKIE;

/// Session id from the request cookie, if present and well formed
pub fn session_id(req: &HttpRequest) -> Option<Uuid> {
    req.cookie(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

pub fn session_cookie(id: Uuid) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, id.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

/// Cookie instructing the browser to forget its session id
pub fn expired_session_cookie() -> Cookie<'static> {
    let mut cookie = session_cookie(Uuid::nil());
    cookie.make_removal();
    cookie
}
