use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when resolving a caller token
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Missing or malformed Authorization header")]
    MissingToken,

    #[error("Token rejected: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Token subject is not a valid user id: {0}")]
    InvalidSubject(String),
}

/// JWT claims issued by the auth service
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Resolves bearer tokens to user ids
///
/// Token issuance, refresh, and roles live in the auth service; this side
/// only validates the HS256 signature and trusts the resolved id.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Resolve an `Authorization: Bearer <token>` header value to a user id
    pub fn user_id_from_header(&self, header: Option<&str>) -> Result<Uuid, IdentityError> {
        let header = header.ok_or(IdentityError::MissingToken)?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(IdentityError::MissingToken)?;

        self.user_id_from_token(token)
    }

    /// Resolve a raw token to a user id
    pub fn user_id_from_token(&self, token: &str) -> Result<Uuid, IdentityError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;

        Uuid::parse_str(&data.claims.sub)
            .map_err(|_| IdentityError::InvalidSubject(data.claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn issue(sub: &str) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_resolves_user_id() {
        let verifier = TokenVerifier::new(SECRET);
        let user_id = Uuid::new_v4();
        let token = issue(&user_id.to_string());

        let header = format!("Bearer {}", token);
        let resolved = verifier.user_id_from_header(Some(&header)).unwrap();

        assert_eq!(resolved, user_id);
    }

    #[test]
    fn test_missing_header_rejected() {
        let verifier = TokenVerifier::new(SECRET);
        assert!(matches!(
            verifier.user_id_from_header(None),
            Err(IdentityError::MissingToken)
        ));
    }

    #[test]
    fn test_non_bearer_header_rejected() {
        let verifier = TokenVerifier::new(SECRET);
        assert!(matches!(
            verifier.user_id_from_header(Some("Basic abc")),
            Err(IdentityError::MissingToken)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let verifier = TokenVerifier::new("other-secret");
        let token = issue(&Uuid::new_v4().to_string());

        assert!(verifier.user_id_from_token(&token).is_err());
    }

    #[test]
    fn test_non_uuid_subject_rejected() {
        let verifier = TokenVerifier::new(SECRET);
        let token = issue("not-a-uuid");

        assert!(matches!(
            verifier.user_id_from_token(&token),
            Err(IdentityError::InvalidSubject(_))
        ));
    }
}
