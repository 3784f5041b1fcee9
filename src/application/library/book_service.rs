use crate::domain::{
    self, BookId, DomainEvent, PersonId,
    book::Book,
    commands::{CreateBook, LendBook, ReturnBook, UpdateBookDescription},
};
use crate::ports::{BookStore, RecordStore};
use std::sync::Arc;

use super::errors::{ConflictKind, EntityKind, InvalidKind, LibraryError, Result};
use super::{ServiceDependencies, record_event};

/// 書籍を取得するヘルパー関数
///
/// 存在しない場合は `NotFound(Book)`。
async fn load_book(books: &Arc<dyn BookStore>, book_id: BookId) -> Result<Book> {
    books
        .get(book_id)
        .await
        .map_err(LibraryError::Unexpected)?
        .ok_or(LibraryError::NotFound(EntityKind::Book))
}

/// 条件付き更新が失敗した後、現在の状態から失敗理由を決める
///
/// 競合相手に先を越された場合は `conflict`、行が消えていた場合は `NotFound(Book)`。
async fn explain_lost_write(
    books: &Arc<dyn BookStore>,
    book_id: BookId,
    conflict: ConflictKind,
) -> LibraryError {
    match load_book(books, book_id).await {
        Ok(_) => {
            tracing::debug!(book_id = book_id.value(), ?conflict, "Conditional write lost");
            LibraryError::Conflict(conflict)
        }
        Err(err) => err,
    }
}

/// 条件付き貸出が失敗した理由を決める
///
/// 書籍が消えていれば `NotFound(Book)`、貸出中なら `Conflict(AlreadyLent)`、
/// 利用者が消えていれば `NotFound(Person)`。
async fn explain_lost_lend(
    deps: &ServiceDependencies,
    book_id: BookId,
    person_id: PersonId,
) -> LibraryError {
    let book = match load_book(&deps.books, book_id).await {
        Ok(book) => book,
        Err(err) => return err,
    };

    if book.holder.is_lent() {
        tracing::debug!(book_id = book_id.value(), "Conditional lend lost");
        return LibraryError::Conflict(ConflictKind::AlreadyLent);
    }

    match deps.persons.get(person_id).await {
        Ok(None) => {
            tracing::debug!(person_id = person_id.value(), "Person removed before lend");
            LibraryError::NotFound(EntityKind::Person)
        }
        Ok(Some(_)) => LibraryError::Conflict(ConflictKind::AlreadyLent),
        Err(err) => LibraryError::Unexpected(err),
    }
}

/// 書籍の一覧を取得する
pub async fn list_books(deps: &ServiceDependencies) -> Result<Vec<Book>> {
    deps.books.list().await.map_err(LibraryError::Unexpected)
}

/// 書籍をIDで取得する
pub async fn get_book(deps: &ServiceDependencies, book_id: BookId) -> Result<Book> {
    load_book(&deps.books, book_id).await
}

/// 書籍を登録する
///
/// ビジネスルール：
/// - タイトル、説明、カテゴリは必須
/// - カテゴリが存在すること
/// - 保持者が番兵値以外なら、その利用者が存在すること（登録時点で貸出中になる）
///
/// # 戻り値
/// 成功時は採番された書籍ID
pub async fn create_book(deps: &ServiceDependencies, cmd: CreateBook) -> Result<BookId> {
    // 1. 必須項目の検証
    let new_book = domain::book::validate_new_book(cmd)?;

    // 2. カテゴリの存在確認
    let category = deps
        .categories
        .get(new_book.category_id)
        .await
        .map_err(LibraryError::Unexpected)?;

    if category.is_none() {
        return Err(LibraryError::Invalid(InvalidKind::UnknownReference(
            EntityKind::Category,
        )));
    }

    // 3. 保持者の存在確認
    if let Some(person_id) = new_book.holder.person_id() {
        let person = deps
            .persons
            .get(person_id)
            .await
            .map_err(LibraryError::Unexpected)?;

        if person.is_none() {
            return Err(LibraryError::Invalid(InvalidKind::UnknownReference(
                EntityKind::Person,
            )));
        }
    }

    // 4. 保存
    let book_id = deps
        .books
        .insert(new_book)
        .await
        .map_err(LibraryError::Unexpected)?;

    tracing::info!(book_id = book_id.value(), "Book created");
    Ok(book_id)
}

/// 書籍の説明を更新する
///
/// タイトル・カテゴリ・保持者は変更されない。
pub async fn update_book_description(
    deps: &ServiceDependencies,
    cmd: UpdateBookDescription,
) -> Result<Book> {
    load_book(&deps.books, cmd.book_id).await?;

    let patch = domain::book::validate_description(cmd.description)?;

    let updated = deps
        .books
        .update_fields(cmd.book_id, patch)
        .await
        .map_err(LibraryError::Unexpected)?;

    if !updated {
        return Err(LibraryError::NotFound(EntityKind::Book));
    }

    load_book(&deps.books, cmd.book_id).await
}

/// 書籍を貸し出す
///
/// 前提条件（この順で確認し、それぞれ別のエラーになる）：
/// 1. 書籍が存在すること → `NotFound(Book)`
/// 2. 書籍が貸出可能であること → `Conflict(AlreadyLent)`
/// 3. 利用者が存在すること → `NotFound(Person)`
///
/// 書き込みは「保持者が番兵値かつ利用者が存在する場合のみ更新」の1文で行うため、
/// 同じ書籍への同時貸出で成功するのは1件のみで、削除済みの利用者が保持者になることはない。
///
/// # 戻り値
/// 更新後の書籍
pub async fn lend_book(deps: &ServiceDependencies, cmd: LendBook) -> Result<Book> {
    let person_id = cmd
        .person_id
        .ok_or(LibraryError::Invalid(InvalidKind::MissingField("personId")))?;

    // 1. 書籍の存在確認
    let book = load_book(&deps.books, cmd.book_id).await?;

    // 2. ドメイン層の純粋関数で状態遷移を判定
    let (_, event) = domain::book::lend_book(&book, person_id, cmd.lent_at).inspect_err(|_| {
        tracing::debug!(book_id = cmd.book_id.value(), "Book is already lent");
    })?;

    // 3. 利用者の存在確認
    let person = deps
        .persons
        .get(person_id)
        .await
        .map_err(LibraryError::Unexpected)?;

    if person.is_none() {
        return Err(LibraryError::NotFound(EntityKind::Person));
    }

    // 4. 条件付き更新
    let lent = deps
        .books
        .lend_if_available(cmd.book_id, person_id)
        .await
        .map_err(LibraryError::Unexpected)?;

    if !lent {
        return Err(explain_lost_lend(deps, cmd.book_id, person_id).await);
    }

    record_event(&DomainEvent::BookLent(event));

    // 5. 更新後の状態を返す
    load_book(&deps.books, cmd.book_id).await
}

/// 書籍を返却する
///
/// 前提条件：
/// 1. 書籍が存在すること → `NotFound(Book)`
/// 2. 書籍が貸出中であること → `Conflict(NotLent)`
///
/// # 戻り値
/// 更新後の書籍（保持者は番兵値）
pub async fn return_book(deps: &ServiceDependencies, cmd: ReturnBook) -> Result<Book> {
    // 1. 書籍の存在確認
    let book = load_book(&deps.books, cmd.book_id).await?;

    // 2. ドメイン層の純粋関数で状態遷移を判定
    let (_, event) = domain::book::return_book(&book, cmd.returned_at).inspect_err(|_| {
        tracing::debug!(book_id = cmd.book_id.value(), "Book is not lent");
    })?;

    // 3. 条件付き更新
    let released = deps
        .books
        .release_if_lent(cmd.book_id)
        .await
        .map_err(LibraryError::Unexpected)?;

    if !released {
        return Err(explain_lost_write(&deps.books, cmd.book_id, ConflictKind::NotLent).await);
    }

    record_event(&DomainEvent::BookReturned(event));

    // 4. 更新後の状態を返す
    load_book(&deps.books, cmd.book_id).await
}

/// 書籍を削除する
///
/// 貸出中の書籍は削除できない（`Conflict(CurrentlyLent)`）。
pub async fn delete_book(deps: &ServiceDependencies, book_id: BookId) -> Result<BookId> {
    let book = load_book(&deps.books, book_id).await?;

    domain::book::ensure_deletable(&book)?;

    let deleted = deps
        .books
        .delete_if_available(book_id)
        .await
        .map_err(LibraryError::Unexpected)?;

    if !deleted {
        return Err(explain_lost_write(&deps.books, book_id, ConflictKind::CurrentlyLent).await);
    }

    tracing::info!(book_id = book_id.value(), "Book deleted");
    Ok(book_id)
}
