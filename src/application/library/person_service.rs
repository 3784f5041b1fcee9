use crate::domain::{
    self, PersonId,
    commands::{CreatePerson, UpdatePerson},
    person::Person,
};
use crate::ports::{PersonStore, RecordStore};
use std::sync::Arc;

use super::ServiceDependencies;
use super::errors::{ConflictKind, EntityKind, LibraryError, Result};

async fn load_person(persons: &Arc<dyn PersonStore>, person_id: PersonId) -> Result<Person> {
    persons
        .get(person_id)
        .await
        .map_err(LibraryError::Unexpected)?
        .ok_or(LibraryError::NotFound(EntityKind::Person))
}

/// 利用者を登録する
///
/// ビジネスルール：
/// - 名・姓・別名・メールアドレスは必須
/// - メールアドレスは全利用者で一意
pub async fn create_person(deps: &ServiceDependencies, cmd: CreatePerson) -> Result<PersonId> {
    let new_person = domain::person::validate_new_person(cmd)?;

    let existing = deps
        .persons
        .find_by_email(&new_person.email)
        .await
        .map_err(LibraryError::Unexpected)?;

    if existing.is_some() {
        return Err(LibraryError::Conflict(ConflictKind::EmailAlreadyRegistered));
    }

    let person_id = deps
        .persons
        .insert(new_person)
        .await
        .map_err(LibraryError::Unexpected)?;

    tracing::info!(person_id = person_id.value(), "Person created");
    Ok(person_id)
}

pub async fn list_persons(deps: &ServiceDependencies) -> Result<Vec<Person>> {
    deps.persons.list().await.map_err(LibraryError::Unexpected)
}

pub async fn get_person(deps: &ServiceDependencies, person_id: PersonId) -> Result<Person> {
    load_person(&deps.persons, person_id).await
}

/// 利用者を更新する
///
/// メールアドレスを含むリクエストは書き込み前に `Invalid(EmailImmutable)` で拒否する。
pub async fn update_person(deps: &ServiceDependencies, cmd: UpdatePerson) -> Result<Person> {
    let person_id = cmd.person_id;

    // 1. 利用者の存在確認
    load_person(&deps.persons, person_id).await?;

    // 2. 更新内容の検証
    let patch = domain::person::validate_update(cmd)?;

    // 3. 保存
    let updated = deps
        .persons
        .update_fields(person_id, patch)
        .await
        .map_err(LibraryError::Unexpected)?;

    if !updated {
        return Err(LibraryError::NotFound(EntityKind::Person));
    }

    load_person(&deps.persons, person_id).await
}

/// 利用者を削除する
///
/// 書籍を保持している利用者は削除できない（`Conflict(HasAssociatedBooks)`）。
pub async fn delete_person(deps: &ServiceDependencies, person_id: PersonId) -> Result<PersonId> {
    load_person(&deps.persons, person_id).await?;

    // 保持判定と削除は1回の条件付き削除で行う
    let deleted = deps
        .persons
        .delete_if_holds_nothing(person_id)
        .await
        .map_err(LibraryError::Unexpected)?;

    if !deleted {
        // 行が消えていれば NotFound、残っていれば保持中の書籍がある
        load_person(&deps.persons, person_id).await?;
        tracing::debug!(person_id = person_id.value(), "Person still holds books");
        return Err(LibraryError::Conflict(ConflictKind::HasAssociatedBooks));
    }

    tracing::info!(person_id = person_id.value(), "Person deleted");
    Ok(person_id)
}
