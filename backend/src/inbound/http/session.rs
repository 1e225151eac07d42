//! Session identity helpers.
//!
//! Wraps the actix session so handlers only store and read a [`UserId`].

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Request extractor exposing the authenticated user.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap an actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Bind `user_id` to the session, rotating the cookie.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// User bound to the session; a tampered value counts as absent.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|raw| {
            UserId::new(&raw)
                .inspect_err(|error| warn!(%error, "discarding invalid session user id"))
                .ok()
        }))
    }

    /// Authenticated user or `401`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = Session::from_request(req, payload);
        Box::pin(async move { session.await.map(Self::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    const ID: &str = "9b2f4c1e-5a37-4d8e-b6f0-1c2d3e4f5a6b";

    async fn whoami(session: SessionContext) -> Result<HttpResponse, Error> {
        let id = session.require_user_id()?;
        Ok(HttpResponse::Ok().body(id.to_string()))
    }

    #[actix_web::test]
    async fn persisted_user_is_read_back() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/login",
                    web::post().to(|session: SessionContext| async move {
                        let id = UserId::new(ID)
                            .map_err(|err| Error::invalid_request(err.to_string()))?;
                        session.persist_user(&id)?;
                        Ok::<_, Error>(HttpResponse::NoContent())
                    }),
                )
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let login =
            test::call_service(&app, test::TestRequest::post().uri("/login").to_request()).await;
        let cookie = session_cookie(&login);
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, ID);
    }

    #[actix_web::test]
    async fn anonymous_request_is_unauthorised() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn tampered_session_value_is_unauthorised() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/forge",
                    web::post().to(|session: Session| async move {
                        session
                            .insert(USER_ID_KEY, "not-a-uuid")
                            .expect("insert forged id");
                        HttpResponse::NoContent()
                    }),
                )
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let forged =
            test::call_service(&app, test::TestRequest::post().uri("/forge").to_request()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .cookie(session_cookie(&forged))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
