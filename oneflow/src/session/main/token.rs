use async_trait::async_trait;

use crate::dal::{DalError, Database, Identifier, Ordering};
use crate::session::config::{TOKEN_BYTES, TOKEN_MAX_ATTEMPTS};
use crate::session::errors::SessionError;
use crate::utils::gen_random_hex;

/// Answers whether a value is already present in a table column.
///
/// [`Database`] implements this with a fresh connection per call.
#[async_trait]
pub trait OccurrenceCheck: Send + Sync {
    async fn occurrence_exists(
        &self,
        table: &Identifier,
        column: &Identifier,
        value: &str,
        ordering: &Ordering,
    ) -> Result<bool, DalError>;
}

#[async_trait]
impl OccurrenceCheck for Database {
    async fn occurrence_exists(
        &self,
        table: &Identifier,
        column: &Identifier,
        value: &str,
        ordering: &Ordering,
    ) -> Result<bool, DalError> {
        self.exists(table, column, value, ordering).await
    }
}

/// Issues a 64-character hex token not yet present in `table.column`.
///
/// Gives up with [`SessionError::TokenCollisionExhausted`] after
/// `TOKEN_MAX_ATTEMPTS` collisions.
pub async fn generate_token<C>(
    checker: &C,
    table: &Identifier,
    column: &Identifier,
    ordering: &Ordering,
) -> Result<String, SessionError>
where
    C: OccurrenceCheck + ?Sized,
{
    generate_token_with_attempts(checker, table, column, ordering, *TOKEN_MAX_ATTEMPTS).await
}

pub(crate) async fn generate_token_with_attempts<C>(
    checker: &C,
    table: &Identifier,
    column: &Identifier,
    ordering: &Ordering,
    max_attempts: usize,
) -> Result<String, SessionError>
where
    C: OccurrenceCheck + ?Sized,
{
    for attempt in 1..=max_attempts {
        let token = gen_random_hex(TOKEN_BYTES)?;
        if !checker
            .occurrence_exists(table, column, &token, ordering)
            .await?
        {
            return Ok(token);
        }
        tracing::warn!(
            "Token collision in {}.{} (attempt {}/{})",
            table,
            column,
            attempt,
            max_attempts
        );
    }
    Err(SessionError::TokenCollisionExhausted {
        attempts: max_attempts,
    })
}
