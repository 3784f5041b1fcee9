use crate::domain::{BookId, CategoryId, PersonId, book::Book};
use async_trait::async_trait;

use super::record_store::{RecordStore, Result};

/// 書籍ストアポート
///
/// 保持者の変更は読み取り・判定・書き込みに分割せず、
/// 1回の条件付き更新として行う。同じ書籍への同時貸出は
/// ストア側で直列化され、成功するのは1件のみ。
#[async_trait]
pub trait BookStore: RecordStore<Book> {
    /// 貸出可能かつ利用者が存在する場合のみ保持者を設定する
    ///
    /// `UPDATE books SET person_id = $p WHERE id = $id AND person_id = 0
    /// AND EXISTS (利用者)` に相当。利用者の削除とは直列化される。
    /// 更新された場合のみ `true`。
    async fn lend_if_available(&self, book_id: BookId, person_id: PersonId) -> Result<bool>;

    /// 貸出中の場合のみ保持者を番兵値に戻す
    async fn release_if_lent(&self, book_id: BookId) -> Result<bool>;

    /// 貸出可能な場合のみ削除する
    async fn delete_if_available(&self, book_id: BookId) -> Result<bool>;

    /// 指定したカテゴリを参照している書籍があるか
    async fn any_in_category(&self, category_id: CategoryId) -> Result<bool>;
}
