use crate::error::CalarmError;
use actix_web::HttpRequest;
use calarm_infra::CalarmContext;
use calarm_utils::secrets_match;

const API_KEY_HEADER: &str = "x-api-key";

/// Only clients knowing the api key of this process are allowed to control it
pub fn protect_route(req: &HttpRequest, ctx: &CalarmContext) -> Result<(), CalarmError> {
    let api_key = match req.headers().get(API_KEY_HEADER) {
        Some(api_key) => match api_key.to_str() {
            Ok(api_key) => api_key,
            Err(_) => {
                return Err(CalarmError::Unauthorized(
                    "Malformed api key provided".to_string(),
                ))
            }
        },
        None => {
            return Err(CalarmError::Unauthorized(
                "Unable to find api-key in x-api-key header".to_string(),
            ))
        }
    };

    if secrets_match(api_key, &ctx.config.api_key) {
        Ok(())
    } else {
        Err(CalarmError::Unauthorized(
            "Invalid api-key provided in x-api-key header".to_string(),
        ))
    }
}

/// The user of the current session
pub fn require_session(ctx: &CalarmContext) -> Result<String, CalarmError> {
    ctx.session.user_id().ok_or_else(|| {
        CalarmError::BadClientData(
            "There is no user session, start one with POST /session".to_string(),
        )
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::test::TestRequest;

    fn ctx() -> CalarmContext {
        let mut ctx = CalarmContext::create_inmemory();
        ctx.config.api_key = "secret".into();
        ctx
    }

    #[actix_web::main]
    #[test]
    async fn accepts_valid_api_key() {
        let ctx = ctx();
        let req = TestRequest::default()
            .insert_header((API_KEY_HEADER, "secret"))
            .to_http_request();
        assert!(protect_route(&req, &ctx).is_ok());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_missing_or_invalid_api_key() {
        let ctx = ctx();
        let req = TestRequest::default().to_http_request();
        assert!(matches!(
            protect_route(&req, &ctx),
            Err(CalarmError::Unauthorized(_))
        ));

        let req = TestRequest::default()
            .insert_header((API_KEY_HEADER, "secreT"))
            .to_http_request();
        assert!(matches!(
            protect_route(&req, &ctx),
            Err(CalarmError::Unauthorized(_))
        ));
    }

    #[actix_web::main]
    #[test]
    async fn requires_session() {
        let ctx = ctx();
        assert!(matches!(
            require_session(&ctx),
            Err(CalarmError::BadClientData(_))
        ));
        ctx.session.start("u1".into());
        assert_eq!(require_session(&ctx).unwrap(), "u1");
    }
}
