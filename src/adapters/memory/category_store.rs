use crate::domain::{
    CategoryId,
    category::{Category, CategoryPatch, NewCategory},
};
use crate::ports::{RecordStore, Result};
use async_trait::async_trait;

use super::{Database, SharedTable};

/// カテゴリ用レコードストアのインメモリ実装
pub struct CategoryStore {
    table: SharedTable<Category>,
}

impl CategoryStore {
    pub fn new(db: &Database) -> Self {
        Self {
            table: db.categories.clone(),
        }
    }
}

#[async_trait]
impl RecordStore<Category> for CategoryStore {
    async fn get(&self, id: CategoryId) -> Result<Option<Category>> {
        Ok(self.table.lock().await.rows.get(&id.value()).cloned())
    }

    async fn list(&self) -> Result<Vec<Category>> {
        Ok(self.table.lock().await.rows.values().cloned().collect())
    }

    async fn insert(&self, record: NewCategory) -> Result<CategoryId> {
        let mut table = self.table.lock().await;
        let id = CategoryId::new(table.next_id());
        table.rows.insert(
            id.value(),
            Category {
                id,
                name: record.name,
            },
        );
        Ok(id)
    }

    async fn update_fields(&self, id: CategoryId, patch: CategoryPatch) -> Result<bool> {
        let mut table = self.table.lock().await;
        match table.rows.get_mut(&id.value()) {
            Some(category) => {
                category.name = patch.name;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: CategoryId) -> Result<bool> {
        Ok(self.table.lock().await.rows.remove(&id.value()).is_some())
    }
}
