use crate::application::library::{ConflictKind, EntityKind, InvalidKind, LibraryError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラー分類をHTTPステータスとエラーコードに対応付ける。
/// 解釈できないリクエスト（不正なJSON、数値でないID）も入力不備として扱う。
#[derive(Debug)]
pub enum ApiError {
    Library(LibraryError),
    MalformedInput(String),
}

impl From<LibraryError> for ApiError {
    fn from(err: LibraryError) -> Self {
        ApiError::Library(err)
    }
}

impl ApiError {
    /// エラーコード（レスポンスの `error` フィールド）
    pub fn code(&self) -> &'static str {
        let err = match self {
            ApiError::Library(err) => err,
            ApiError::MalformedInput(_) => return "INVALID_INPUT",
        };

        match err {
            LibraryError::NotFound(EntityKind::Book) => "BOOK_NOT_FOUND",
            LibraryError::NotFound(EntityKind::Person) => "PERSON_NOT_FOUND",
            LibraryError::NotFound(EntityKind::Category) => "CATEGORY_NOT_FOUND",
            LibraryError::Conflict(ConflictKind::AlreadyLent) => "ALREADY_LENT",
            LibraryError::Conflict(ConflictKind::NotLent) => "NOT_LENT",
            LibraryError::Conflict(ConflictKind::CurrentlyLent) => "CURRENTLY_LENT",
            LibraryError::Conflict(ConflictKind::HasAssociatedBooks) => "HAS_ASSOCIATED_BOOKS",
            LibraryError::Conflict(ConflictKind::EmailAlreadyRegistered) => {
                "EMAIL_ALREADY_REGISTERED"
            }
            LibraryError::Invalid(InvalidKind::MissingField(_)) => "MISSING_FIELD",
            LibraryError::Invalid(InvalidKind::UnknownReference(_)) => "UNKNOWN_REFERENCE",
            LibraryError::Invalid(InvalidKind::EmailImmutable) => "EMAIL_IMMUTABLE",
            LibraryError::Unexpected(_) => "UNEXPECTED_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        let err = match self {
            ApiError::Library(err) => err,
            // 422 Unprocessable Entity - 解釈できない入力
            ApiError::MalformedInput(_) => return StatusCode::UNPROCESSABLE_ENTITY,
        };

        match err {
            // 404 Not Found - リクエストされたリソースが存在しない
            LibraryError::NotFound(_) => StatusCode::NOT_FOUND,
            // 409 Conflict - 状態遷移の前提条件違反
            LibraryError::Conflict(_) => StatusCode::CONFLICT,
            // 422 Unprocessable Entity - 入力の不備
            LibraryError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            // 500 Internal Server Error - ストア障害
            LibraryError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let message = match self {
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            ApiError::Library(LibraryError::Unexpected(source)) => {
                tracing::error!("Record store error: {}", source);
                "An unexpected error occurred".to_string()
            }
            ApiError::Library(other) => other.to_string(),
            ApiError::MalformedInput(detail) => {
                tracing::debug!(%detail, "Rejected malformed request");
                detail
            }
        };

        let body = Json(ErrorResponse::new(code, message));
        (status, body).into_response()
    }
}
