//! Documentation-only shapes of the response envelope built by
//! `shared::api::ApiResponse`.

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct SuccessResponse<T> {
    #[schema(example = true)]
    pub success: bool,
    pub data: T,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    pub error: ErrorDetail,
}

/// `code` is stable upper snake case; `message` is for people.
#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    #[schema(example = "FILE_TOO_LARGE")]
    pub code: String,

    #[schema(example = "File exceeds the 10485760 byte limit for image")]
    pub message: String,
}
