use crate::backend::BackendError;
use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use uuid::Uuid;

/// The signed-in buyer, as resolved from an access token.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
}

#[derive(Debug, Clone)]
/// Resolve the user behind a bearer access token.
///
/// Returns `None` for unknown or expired tokens.
pub struct LookupUser {
    pub access_token: String,
}

/// Digest under which an access token is stored: base64(SHA-256(token)).
///
/// Raw tokens never reach the database.
pub fn access_token_digest(access_token: &str) -> String {
    let digest = ring::digest::digest(&ring::digest::SHA256, access_token.as_bytes());
    fast32::base64::RFC4648_NOPAD.encode(digest.as_ref())
}

impl Processor<LookupUser> for DatabaseProcessor {
    type Output = Option<AuthenticatedUser>;
    type Error = BackendError;
    #[tracing::instrument(skip_all, err, name = "SQL:LookupUser")]
    async fn process(&self, query: LookupUser) -> Result<Option<AuthenticatedUser>, BackendError> {
        let user = sqlx::query_as::<_, AuthenticatedUser>(
            r#"
            SELECT u.id, u.email
            FROM user_sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token_digest = $1
              AND s.expires_at > NOW()
            "#,
        )
        .bind(access_token_digest(&query.access_token))
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}
