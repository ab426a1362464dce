use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body returned for every non-2xx response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Short, stable error category
    #[schema(example = "requested item not found")]
    pub error: String,
    /// Human readable detail, generic for server-side failures
    #[schema(example = "unknown province")]
    pub message: String,
}
