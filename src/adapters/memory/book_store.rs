use crate::domain::{
    BookId, CategoryId, Holder, PersonId,
    book::{Book, BookPatch, NewBook},
    person::Person,
};
use crate::ports::{BookStore as BookStoreTrait, RecordStore, Result};
use async_trait::async_trait;

use super::{Database, SharedTable};

/// BookStoreのインメモリ実装
///
/// 貸出時に利用者の存在を確認するため、利用者の表も参照する。
pub struct BookStore {
    table: SharedTable<Book>,
    persons: SharedTable<Person>,
}

impl BookStore {
    pub fn new(db: &Database) -> Self {
        Self {
            table: db.books.clone(),
            persons: db.persons.clone(),
        }
    }
}

#[async_trait]
impl RecordStore<Book> for BookStore {
    async fn get(&self, id: BookId) -> Result<Option<Book>> {
        Ok(self.table.lock().await.rows.get(&id.value()).cloned())
    }

    async fn list(&self) -> Result<Vec<Book>> {
        Ok(self.table.lock().await.rows.values().cloned().collect())
    }

    async fn insert(&self, record: NewBook) -> Result<BookId> {
        let mut table = self.table.lock().await;
        let id = BookId::new(table.next_id());
        table.rows.insert(
            id.value(),
            Book {
                id,
                title: record.title,
                description: record.description,
                category_id: record.category_id,
                holder: record.holder,
            },
        );
        Ok(id)
    }

    async fn update_fields(&self, id: BookId, patch: BookPatch) -> Result<bool> {
        let mut table = self.table.lock().await;
        match table.rows.get_mut(&id.value()) {
            Some(book) => {
                book.description = patch.description;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: BookId) -> Result<bool> {
        Ok(self.table.lock().await.rows.remove(&id.value()).is_some())
    }
}

#[async_trait]
impl BookStoreTrait for BookStore {
    async fn lend_if_available(&self, book_id: BookId, person_id: PersonId) -> Result<bool> {
        let mut table = self.table.lock().await;
        let persons = self.persons.lock().await;
        if !persons.rows.contains_key(&person_id.value()) {
            return Ok(false);
        }

        match table.rows.get_mut(&book_id.value()) {
            Some(book) if book.holder == Holder::Available => {
                book.holder = Holder::LentTo(person_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn release_if_lent(&self, book_id: BookId) -> Result<bool> {
        let mut table = self.table.lock().await;
        match table.rows.get_mut(&book_id.value()) {
            Some(book) if book.holder.is_lent() => {
                book.holder = Holder::Available;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_if_available(&self, book_id: BookId) -> Result<bool> {
        let mut table = self.table.lock().await;
        let available = table
            .rows
            .get(&book_id.value())
            .is_some_and(|book| !book.holder.is_lent());

        if available {
            table.rows.remove(&book_id.value());
        }
        Ok(available)
    }

    async fn any_in_category(&self, category_id: CategoryId) -> Result<bool> {
        let table = self.table.lock().await;
        Ok(table
            .rows
            .values()
            .any(|book| book.category_id == category_id))
    }
}
