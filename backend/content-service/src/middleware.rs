/// Request identity extraction.
///
/// Authentication happens at the gateway; by the time a request reaches this
/// service the caller's id has been verified and injected as the
/// `x-user-id` header. Handlers that act on behalf of a user take [`UserId`]
/// as an extractor.
use crate::error::AppError;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub Uuid);

impl FromRequest for UserId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user_id = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing user context".to_string()))
            .and_then(|raw| {
                Uuid::parse_str(raw)
                    .map(UserId)
                    .map_err(|_| AppError::Unauthorized("Invalid user id".to_string()))
            });

        ready(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_extracts_valid_user_id() {
        let id = Uuid::new_v4();
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, id.to_string()))
            .to_http_request();

        let user = UserId::from_request(&req, &mut Payload::None)
            .await
            .unwrap();
        assert_eq!(user.0, id);
    }

    #[actix_web::test]
    async fn test_missing_header_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        let err = UserId::from_request(&req, &mut Payload::None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[actix_web::test]
    async fn test_malformed_header_is_unauthorized() {
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, "not-a-uuid"))
            .to_http_request();
        let err = UserId::from_request(&req, &mut Payload::None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
