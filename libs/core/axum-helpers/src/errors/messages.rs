//! User-facing messages shared by every service.

/// Body that is not a JSON object.
pub const INVALID_DATA_FORMAT: &str = "Invalid data format.";

/// Any failure the client cannot act on. Details go to the logs only.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";

pub const ROUTE_NOT_FOUND: &str = "The requested resource was not found";
pub const METHOD_NOT_ALLOWED: &str = "The HTTP method is not allowed for this resource";
