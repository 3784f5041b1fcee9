/// 貸出のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LendBookError {
    /// 既に貸出中
    AlreadyLent,
}

/// 返却のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnBookError {
    /// 貸出されていない
    NotLent,
}

/// 書籍削除のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteBookError {
    /// 貸出中のため削除不可
    CurrentlyLent,
}

/// 利用者更新のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdatePersonError {
    /// メールアドレスは作成後に変更できない
    EmailImmutable,
    /// 入力検証の失敗
    Invalid(ValidationError),
}

/// 入力検証のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// 必須項目が欠けている（値はJSONのキー名）
    MissingField(&'static str),
}
