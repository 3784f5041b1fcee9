use chrono::{DateTime, Utc};

use super::{
    BookId, BookLent, BookReturned, BookState, CategoryId, DeleteBookError, Holder,
    LendBookError, PersonId, ReturnBookError, ValidationError, commands::CreateBook,
    validation::required_text,
};

/// 書籍
///
/// 貸出状態は保持者（`holder`）だけで決まる。
/// - `Holder::Available` → 貸出可能
/// - `Holder::LentTo(_)` → 貸出中
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub description: String,
    pub category_id: CategoryId,
    pub holder: Holder,
}

impl Book {
    pub fn state(&self) -> BookState {
        BookState::from(self.holder)
    }
}

/// 登録前の書籍（検証済み）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub description: String,
    pub category_id: CategoryId,
    pub holder: Holder,
}

/// 書籍の部分更新
///
/// 汎用の更新操作で変更できるのは説明のみ。
/// 保持者は条件付き更新（`BookStore`）でのみ変更する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookPatch {
    pub description: String,
}

/// 純粋関数：登録コマンドを検証する
///
/// ビジネスルール：
/// - タイトル、説明、カテゴリは必須
/// - 保持者が未指定または番兵値なら貸出可能状態で登録する
///
/// 参照先（カテゴリ・利用者）の存在確認はI/Oを伴うためアプリケーション層で行う。
pub fn validate_new_book(cmd: CreateBook) -> Result<NewBook, ValidationError> {
    let title = required_text(cmd.title, "title")?;
    let description = required_text(cmd.description, "description")?;
    let category_id = cmd
        .category_id
        .ok_or(ValidationError::MissingField("categoryId"))?;
    let holder = cmd
        .person_id
        .map(|person_id| Holder::from_raw(person_id.value()))
        .unwrap_or_default();

    Ok(NewBook {
        title,
        description,
        category_id,
        holder,
    })
}

/// 純粋関数：説明の更新内容を検証する
pub fn validate_description(description: Option<String>) -> Result<BookPatch, ValidationError> {
    let description = required_text(description, "description")?;
    Ok(BookPatch { description })
}

/// 純粋関数：書籍を貸し出す
///
/// ビジネスルール：
/// - 貸出可能な書籍のみ貸し出せる
///
/// 副作用なし。新しいBookとイベントを返す。
pub fn lend_book(
    book: &Book,
    person_id: PersonId,
    lent_at: DateTime<Utc>,
) -> Result<(Book, BookLent), LendBookError> {
    if book.holder.is_lent() {
        return Err(LendBookError::AlreadyLent);
    }

    let lent = Book {
        holder: Holder::LentTo(person_id),
        ..book.clone()
    };

    let event = BookLent {
        book_id: book.id,
        person_id,
        lent_at,
    };

    Ok((lent, event))
}

/// 純粋関数：書籍を返却する
///
/// ビジネスルール：
/// - 貸出中の書籍のみ返却できる
///
/// 副作用なし。新しいBookとイベントを返す。
pub fn return_book(
    book: &Book,
    returned_at: DateTime<Utc>,
) -> Result<(Book, BookReturned), ReturnBookError> {
    let person_id = book.holder.person_id().ok_or(ReturnBookError::NotLent)?;

    let returned = Book {
        holder: Holder::Available,
        ..book.clone()
    };

    let event = BookReturned {
        book_id: book.id,
        person_id,
        returned_at,
    };

    Ok((returned, event))
}

/// 純粋関数：削除可能か判定する
pub fn ensure_deletable(book: &Book) -> Result<(), DeleteBookError> {
    if book.holder.is_lent() {
        return Err(DeleteBookError::CurrentlyLent);
    }
    Ok(())
}
