use crate::domain::{
    PersonId,
    person::{NewPerson, Person, PersonPatch},
};
use crate::ports::{PersonStore as PersonStoreTrait, RecordStore, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

fn map_row_to_person(row: &PgRow) -> Result<Person> {
    Ok(Person {
        id: PersonId::new(row.try_get("id")?),
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        alias: row.try_get("alias")?,
        email: row.try_get("email")?,
    })
}

/// PostgreSQL implementation of PersonStore
///
/// Email uniqueness is also backed by a UNIQUE constraint on `persons.email`.
pub struct PersonStore {
    pool: PgPool,
}

impl PersonStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<Person> for PersonStore {
    async fn get(&self, id: PersonId) -> Result<Option<Person>> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, alias, email
            FROM persons
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_person).transpose()
    }

    async fn list(&self) -> Result<Vec<Person>> {
        let rows = sqlx::query(
            r#"
            SELECT id, first_name, last_name, alias, email
            FROM persons
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_person).collect()
    }

    async fn insert(&self, record: NewPerson) -> Result<PersonId> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO persons (first_name, last_name, alias, email)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(&record.alias)
        .bind(&record.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(PersonId::new(id))
    }

    /// The email column is never part of the UPDATE.
    async fn update_fields(&self, id: PersonId, patch: PersonPatch) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE persons
            SET first_name = $1, last_name = $2, alias = $3
            WHERE id = $4
            "#,
        )
        .bind(&patch.first_name)
        .bind(&patch.last_name)
        .bind(&patch.alias)
        .bind(id.value())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, id: PersonId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM persons WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl PersonStoreTrait for PersonStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Person>> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, alias, email
            FROM persons
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_person).transpose()
    }

    /// Locks the person row, then checks for held books and deletes in one
    /// transaction. A concurrent lend holds `FOR KEY SHARE` on the same row,
    /// so the two never interleave.
    async fn delete_if_holds_nothing(&self, person_id: PersonId) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let locked: Option<i64> =
            sqlx::query_scalar("SELECT id FROM persons WHERE id = $1 FOR UPDATE")
                .bind(person_id.value())
                .fetch_optional(&mut *tx)
                .await?;

        if locked.is_none() {
            return Ok(false);
        }

        let holds_books: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM books WHERE person_id = $1)")
                .bind(person_id.value())
                .fetch_one(&mut *tx)
                .await?;

        if holds_books {
            return Ok(false);
        }

        let result = sqlx::query("DELETE FROM persons WHERE id = $1")
            .bind(person_id.value())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() == 1)
    }
}
