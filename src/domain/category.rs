use super::{
    CategoryId, ValidationError,
    commands::{CreateCategory, UpdateCategory},
    validation::required_text,
};

/// 書籍カテゴリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: String,
}

pub fn validate_new_category(cmd: CreateCategory) -> Result<NewCategory, ValidationError> {
    Ok(NewCategory {
        name: required_text(cmd.name, "name")?,
    })
}

pub fn validate_category_update(cmd: UpdateCategory) -> Result<CategoryPatch, ValidationError> {
    Ok(CategoryPatch {
        name: required_text(cmd.name, "name")?,
    })
}
