//! Integer identifier path parameters.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Parse a positive `i32` identifier. Signs, whitespace and zero are rejected.
///
/// ```rust
/// use axum_helpers::extractors::parse_id;
///
/// assert_eq!(parse_id("42"), Some(42));
/// assert_eq!(parse_id("0"), None);
/// assert_eq!(parse_id("abc"), None);
/// ```
pub fn parse_id(raw: &str) -> Option<i32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<i32>().ok().filter(|id| *id > 0)
}

/// Read the single path parameter as an id, rejecting with `invalid_message`.
///
/// Domain crates wrap this in their own extractor so each resource keeps its
/// own message:
///
/// ```ignore
/// pub struct ProductId(pub i32);
///
/// impl<S: Send + Sync> FromRequestParts<S> for ProductId {
///     type Rejection = AppError;
///
///     async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
///         id_from_path(parts, state, "Invalid product ID.").await.map(ProductId)
///     }
/// }
/// ```
pub async fn id_from_path<S>(
    parts: &mut Parts,
    state: &S,
    invalid_message: &'static str,
) -> Result<i32, AppError>
where
    S: Send + Sync,
{
    let Path(raw) = Path::<String>::from_request_parts(parts, state)
        .await
        .map_err(|_| AppError::invalid_id(invalid_message))?;

    parse_id(&raw).ok_or_else(|| AppError::invalid_id(invalid_message))
}
