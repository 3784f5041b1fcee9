use crate::domain::{PersonId, person::Person};
use async_trait::async_trait;

use super::record_store::{RecordStore, Result};

/// 利用者ストアポート
#[async_trait]
pub trait PersonStore: RecordStore<Person> {
    /// メールアドレスで利用者を検索する
    ///
    /// 登録時のメールアドレス一意性の確認に使用される。
    async fn find_by_email(&self, email: &str) -> Result<Option<Person>>;

    /// 書籍を1冊も保持していない場合のみ削除する
    ///
    /// 保持判定と削除は1つの操作として行われ、同じ利用者への貸出とは直列化される。
    /// 削除された場合のみ `true`。
    async fn delete_if_holds_nothing(&self, person_id: PersonId) -> Result<bool>;
}
