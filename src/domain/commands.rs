use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookId, CategoryId, PersonId};

/// コマンド：書籍を登録する
///
/// 必須項目の検証はドメイン層で行うため、入力のまま保持する。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreateBook {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    /// 未指定または 0 の場合は貸出可能状態で登録される
    pub person_id: Option<PersonId>,
}

/// コマンド：書籍の説明を更新する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBookDescription {
    pub book_id: BookId,
    pub description: Option<String>,
}

/// コマンド：書籍を貸し出す
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LendBook {
    pub book_id: BookId,
    pub person_id: Option<PersonId>,
    pub lent_at: DateTime<Utc>,
}

/// コマンド：書籍を返却する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnBook {
    pub book_id: BookId,
    pub returned_at: DateTime<Utc>,
}

/// コマンド：利用者を登録する
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreatePerson {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub alias: Option<String>,
    pub email: Option<String>,
}

/// コマンド：利用者を更新する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePerson {
    pub person_id: PersonId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub alias: Option<String>,
    /// リクエストにメールアドレスが含まれていたか（値がnullでも true）
    pub includes_email: bool,
}

/// コマンド：カテゴリを登録する
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreateCategory {
    pub name: Option<String>,
}

/// コマンド：カテゴリ名を更新する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCategory {
    pub category_id: CategoryId,
    pub name: Option<String>,
}
