use crate::domain::{
    BookId, CategoryId, Holder, PersonId,
    book::{Book, BookPatch, NewBook},
};
use crate::ports::{BookStore as BookStoreTrait, RecordStore, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

/// PostgreSQLの行データをBookに変換する
///
/// person_id列の番兵値（0）は `Holder::Available` に変換される。
fn map_row_to_book(row: &PgRow) -> Result<Book> {
    Ok(Book {
        id: BookId::new(row.try_get("id")?),
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        category_id: CategoryId::new(row.try_get("category_id")?),
        holder: Holder::from_raw(row.try_get("person_id")?),
    })
}

/// BookStoreのPostgreSQL実装
///
/// 保持者の変更はすべて条件付きUPDATE 1文で行い、
/// `rows_affected()` で成否を判定する。
pub struct BookStore {
    pool: PgPool,
}

impl BookStore {
    /// PostgreSQLコネクションプールから新しいBookStoreを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<Book> for BookStore {
    async fn get(&self, id: BookId) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, category_id, person_id
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_book).transpose()
    }

    async fn list(&self) -> Result<Vec<Book>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, category_id, person_id
            FROM books
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_book).collect()
    }

    async fn insert(&self, record: NewBook) -> Result<BookId> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO books (title, description, category_id, person_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&record.title)
        .bind(&record.description)
        .bind(record.category_id.value())
        .bind(record.holder.to_raw())
        .fetch_one(&self.pool)
        .await?;

        Ok(BookId::new(id))
    }

    async fn update_fields(&self, id: BookId, patch: BookPatch) -> Result<bool> {
        let result = sqlx::query("UPDATE books SET description = $1 WHERE id = $2")
            .bind(&patch.description)
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, id: BookId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl BookStoreTrait for BookStore {
    /// 利用者の行を `FOR KEY SHARE` でロックし、同時に走る利用者削除を待たせる
    async fn lend_if_available(&self, book_id: BookId, person_id: PersonId) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET person_id = $1
            WHERE id = $2
              AND person_id = $3
              AND EXISTS (SELECT 1 FROM persons WHERE id = $1 FOR KEY SHARE)
            "#,
        )
        .bind(person_id.value())
        .bind(book_id.value())
        .bind(Holder::SENTINEL)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn release_if_lent(&self, book_id: BookId) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET person_id = $1
            WHERE id = $2 AND person_id <> $1
            "#,
        )
        .bind(Holder::SENTINEL)
        .bind(book_id.value())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_if_available(&self, book_id: BookId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1 AND person_id = $2")
            .bind(book_id.value())
            .bind(Holder::SENTINEL)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn any_in_category(&self, category_id: CategoryId) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM books WHERE category_id = $1)")
                .bind(category_id.value())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}
