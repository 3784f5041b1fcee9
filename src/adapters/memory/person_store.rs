use crate::domain::{
    Holder, PersonId,
    book::Book,
    person::{NewPerson, Person, PersonPatch},
};
use crate::ports::{PersonStore as PersonStoreTrait, RecordStore, Result};
use async_trait::async_trait;

use super::{Database, SharedTable};

/// PersonStoreのインメモリ実装
pub struct PersonStore {
    table: SharedTable<Person>,
    books: SharedTable<Book>,
}

impl PersonStore {
    pub fn new(db: &Database) -> Self {
        Self {
            table: db.persons.clone(),
            books: db.books.clone(),
        }
    }
}

#[async_trait]
impl RecordStore<Person> for PersonStore {
    async fn get(&self, id: PersonId) -> Result<Option<Person>> {
        Ok(self.table.lock().await.rows.get(&id.value()).cloned())
    }

    async fn list(&self) -> Result<Vec<Person>> {
        Ok(self.table.lock().await.rows.values().cloned().collect())
    }

    /// メールアドレスが重複する場合はPostgreSQLの一意制約と同様にエラーを返す
    async fn insert(&self, record: NewPerson) -> Result<PersonId> {
        let mut table = self.table.lock().await;
        if table.rows.values().any(|p| p.email == record.email) {
            return Err(format!("duplicate email: {}", record.email).into());
        }

        let id = PersonId::new(table.next_id());
        table.rows.insert(
            id.value(),
            Person {
                id,
                first_name: record.first_name,
                last_name: record.last_name,
                alias: record.alias,
                email: record.email,
            },
        );
        Ok(id)
    }

    async fn update_fields(&self, id: PersonId, patch: PersonPatch) -> Result<bool> {
        let mut table = self.table.lock().await;
        match table.rows.get_mut(&id.value()) {
            Some(person) => {
                person.first_name = patch.first_name;
                person.last_name = patch.last_name;
                person.alias = patch.alias;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: PersonId) -> Result<bool> {
        Ok(self.table.lock().await.rows.remove(&id.value()).is_some())
    }
}

#[async_trait]
impl PersonStoreTrait for PersonStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Person>> {
        let table = self.table.lock().await;
        Ok(table.rows.values().find(|p| p.email == email).cloned())
    }

    async fn delete_if_holds_nothing(&self, id: PersonId) -> Result<bool> {
        // 貸出と同じく books → persons の順でロックする
        let books = self.books.lock().await;
        let mut table = self.table.lock().await;

        let holds_books = books
            .rows
            .values()
            .any(|book| book.holder == Holder::LentTo(id));
        if holds_books {
            return Ok(false);
        }

        Ok(table.rows.remove(&id.value()).is_some())
    }
}
