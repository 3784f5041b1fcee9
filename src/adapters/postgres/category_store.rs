use crate::domain::{
    CategoryId,
    category::{Category, CategoryPatch, NewCategory},
};
use crate::ports::{RecordStore, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

fn map_row_to_category(row: &PgRow) -> Result<Category> {
    Ok(Category {
        id: CategoryId::new(row.try_get("id")?),
        name: row.try_get("name")?,
    })
}

/// カテゴリ用レコードストアのPostgreSQL実装
pub struct CategoryStore {
    pool: PgPool,
}

impl CategoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<Category> for CategoryStore {
    async fn get(&self, id: CategoryId) -> Result<Option<Category>> {
        let row = sqlx::query("SELECT id, name FROM categories WHERE id = $1")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_row_to_category).transpose()
    }

    async fn list(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query("SELECT id, name FROM categories ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_row_to_category).collect()
    }

    async fn insert(&self, record: NewCategory) -> Result<CategoryId> {
        let id: i64 = sqlx::query_scalar("INSERT INTO categories (name) VALUES ($1) RETURNING id")
            .bind(&record.name)
            .fetch_one(&self.pool)
            .await?;

        Ok(CategoryId::new(id))
    }

    async fn update_fields(&self, id: CategoryId, patch: CategoryPatch) -> Result<bool> {
        let result = sqlx::query("UPDATE categories SET name = $1 WHERE id = $2")
            .bind(&patch.name)
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, id: CategoryId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }
}
