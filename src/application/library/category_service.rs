use crate::domain::{
    self, CategoryId,
    category::Category,
    commands::{CreateCategory, UpdateCategory},
};

use super::ServiceDependencies;
use super::errors::{ConflictKind, EntityKind, LibraryError, Result};

async fn load_category(deps: &ServiceDependencies, category_id: CategoryId) -> Result<Category> {
    deps.categories
        .get(category_id)
        .await
        .map_err(LibraryError::Unexpected)?
        .ok_or(LibraryError::NotFound(EntityKind::Category))
}

pub async fn create_category(
    deps: &ServiceDependencies,
    cmd: CreateCategory,
) -> Result<CategoryId> {
    let new_category = domain::category::validate_new_category(cmd)?;

    let category_id = deps
        .categories
        .insert(new_category)
        .await
        .map_err(LibraryError::Unexpected)?;

    tracing::info!(category_id = category_id.value(), "Category created");
    Ok(category_id)
}

pub async fn list_categories(deps: &ServiceDependencies) -> Result<Vec<Category>> {
    deps.categories.list().await.map_err(LibraryError::Unexpected)
}

pub async fn get_category(deps: &ServiceDependencies, category_id: CategoryId) -> Result<Category> {
    load_category(deps, category_id).await
}

pub async fn update_category(deps: &ServiceDependencies, cmd: UpdateCategory) -> Result<Category> {
    let category_id = cmd.category_id;
    load_category(deps, category_id).await?;

    let patch = domain::category::validate_category_update(cmd)?;

    let updated = deps
        .categories
        .update_fields(category_id, patch)
        .await
        .map_err(LibraryError::Unexpected)?;

    if !updated {
        return Err(LibraryError::NotFound(EntityKind::Category));
    }

    load_category(deps, category_id).await
}

/// カテゴリを削除する
///
/// 書籍から参照されているカテゴリは削除できない（`Conflict(HasAssociatedBooks)`）。
pub async fn delete_category(
    deps: &ServiceDependencies,
    category_id: CategoryId,
) -> Result<CategoryId> {
    load_category(deps, category_id).await?;

    let referenced = deps
        .books
        .any_in_category(category_id)
        .await
        .map_err(LibraryError::Unexpected)?;

    if referenced {
        return Err(LibraryError::Conflict(ConflictKind::HasAssociatedBooks));
    }

    let deleted = deps
        .categories
        .delete(category_id)
        .await
        .map_err(LibraryError::Unexpected)?;

    if !deleted {
        return Err(LibraryError::NotFound(EntityKind::Category));
    }

    tracing::info!(category_id = category_id.value(), "Category deleted");
    Ok(category_id)
}
