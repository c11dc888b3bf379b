use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::AppState;

/// Account kind carried in the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Business,
    Admin,
}

/// Authenticated caller, stored in request extensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
    pub role: UserRole,
}

/// Claims expected inside the JWT. Tokens are issued elsewhere.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user id
    pub sub: String,
    pub role: UserRole,
    pub exp: usize,
}

/// Validates `Authorization: Bearer <jwt>` and attaches a `CurrentUser`.
pub async fn jwt_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("missing bearer token".into()))?;

    let claims = decode_token(token, &state.config.jwt_secret)?;

    req.extensions_mut().insert(CurrentUser {
        id: claims.sub,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    decode::<Claims>(token, &decoding_key, &Validation::new(Algorithm::HS256))
        .map(|data| data.claims)
        .map_err(|e| AppError::Unauthorized(format!("invalid token: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(secret: &str, exp: usize) -> String {
        let claims = Claims {
            sub: "user-1".into(),
            role: UserRole::Business,
            exp,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    fn far_future() -> usize {
        (chrono::Utc::now().timestamp() + 3600) as usize
    }

    #[test]
    fn test_decode_valid_token() {
        let claims = decode_token(&token("secret", far_future()), "secret").unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.role, UserRole::Business);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let result = decode_token(&token("secret", far_future()), "other");
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let expired = (chrono::Utc::now().timestamp() - 3600) as usize;
        assert!(decode_token(&token("secret", expired), "secret").is_err());
    }
}
