use crate::domain::{
    BookId, CategoryId, PersonId,
    book::{Book, BookPatch, NewBook},
    category::{Category, CategoryPatch, NewCategory},
    person::{NewPerson, Person, PersonPatch},
};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// レコードストアに保存されるエンティティ
///
/// 識別子・登録用の値・部分更新用の値をエンティティごとに結び付ける。
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Copy + Send + Sync + 'static;
    type New: Send + 'static;
    type Patch: Send + 'static;
}

impl Entity for Book {
    type Id = BookId;
    type New = NewBook;
    type Patch = BookPatch;
}

impl Entity for Person {
    type Id = PersonId;
    type New = NewPerson;
    type Patch = PersonPatch;
}

impl Entity for Category {
    type Id = CategoryId;
    type New = NewCategory;
    type Patch = CategoryPatch;
}

/// レコードストアポート
///
/// 一意な数値IDを持つ行の永続化を抽象化する。
/// テストではインメモリ実装、本番ではPostgreSQL実装を注入する。
#[async_trait]
pub trait RecordStore<E: Entity>: Send + Sync {
    /// IDで取得する。存在しない場合は `None`
    async fn get(&self, id: E::Id) -> Result<Option<E>>;

    /// 全件をID順で取得する
    async fn list(&self) -> Result<Vec<E>>;

    /// 新しい行を追加し、採番されたIDを返す
    async fn insert(&self, record: E::New) -> Result<E::Id>;

    /// 部分更新する。対象行が存在しなかった場合は `false`
    async fn update_fields(&self, id: E::Id, patch: E::Patch) -> Result<bool>;

    /// 削除する。対象行が存在しなかった場合は `false`
    async fn delete(&self, id: E::Id) -> Result<bool>;
}
