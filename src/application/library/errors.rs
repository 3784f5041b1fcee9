use crate::domain::{
    DeleteBookError, LendBookError, ReturnBookError, UpdatePersonError, ValidationError,
};
use thiserror::Error;

/// 操作対象のエンティティ種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EntityKind {
    #[error("Book")]
    Book,
    #[error("Person")]
    Person,
    #[error("Category")]
    Category,
}

/// 状態遷移の前提条件違反
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConflictKind {
    /// 既に貸出中の書籍を貸し出そうとした
    #[error("Book is already lent and cannot be lent until it is returned")]
    AlreadyLent,
    /// 貸出されていない書籍を返却しようとした
    #[error("Book is not lent")]
    NotLent,
    /// 貸出中の書籍を削除しようとした
    #[error("Book is currently lent and cannot be deleted")]
    CurrentlyLent,
    /// 書籍から参照されている利用者・カテゴリを削除しようとした
    #[error("Record has associated books and cannot be deleted")]
    HasAssociatedBooks,
    /// メールアドレスが登録済み
    #[error("Email is already registered")]
    EmailAlreadyRegistered,
}

/// 入力の不備
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidKind {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Referenced {0} does not exist")]
    UnknownReference(EntityKind),
    #[error("Email cannot be modified")]
    EmailImmutable,
}

/// 図書館アプリケーション層のエラー
///
/// API層はこの分類だけを見てステータスコードとメッセージを決める。
#[derive(Debug, Error)]
pub enum LibraryError {
    /// IDに該当するエンティティが存在しない
    #[error("{0} not found")]
    NotFound(EntityKind),

    /// 状態遷移の前提条件違反
    #[error("{0}")]
    Conflict(ConflictKind),

    /// 入力の不備
    #[error("{0}")]
    Invalid(InvalidKind),

    /// レコードストアの障害
    #[error("Unexpected store error")]
    Unexpected(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<ValidationError> for LibraryError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingField(field) => {
                LibraryError::Invalid(InvalidKind::MissingField(field))
            }
        }
    }
}

impl From<LendBookError> for LibraryError {
    fn from(err: LendBookError) -> Self {
        match err {
            LendBookError::AlreadyLent => LibraryError::Conflict(ConflictKind::AlreadyLent),
        }
    }
}

impl From<ReturnBookError> for LibraryError {
    fn from(err: ReturnBookError) -> Self {
        match err {
            ReturnBookError::NotLent => LibraryError::Conflict(ConflictKind::NotLent),
        }
    }
}

impl From<DeleteBookError> for LibraryError {
    fn from(err: DeleteBookError) -> Self {
        match err {
            DeleteBookError::CurrentlyLent => LibraryError::Conflict(ConflictKind::CurrentlyLent),
        }
    }
}

impl From<UpdatePersonError> for LibraryError {
    fn from(err: UpdatePersonError) -> Self {
        match err {
            UpdatePersonError::EmailImmutable => {
                LibraryError::Invalid(InvalidKind::EmailImmutable)
            }
            UpdatePersonError::Invalid(err) => err.into(),
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, LibraryError>;
