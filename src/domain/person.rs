use super::{
    PersonId, UpdatePersonError, ValidationError,
    commands::{CreatePerson, UpdatePerson},
    validation::required_text,
};

/// 利用者
///
/// 不変条件：メールアドレスは全利用者で一意、かつ作成後に変更できない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: PersonId,
    pub first_name: String,
    pub last_name: String,
    pub alias: String,
    pub email: String,
}

/// 登録前の利用者（検証済み）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub first_name: String,
    pub last_name: String,
    pub alias: String,
    pub email: String,
}

/// 利用者の部分更新（メールアドレスは含まない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonPatch {
    pub first_name: String,
    pub last_name: String,
    pub alias: String,
}

impl From<ValidationError> for UpdatePersonError {
    fn from(err: ValidationError) -> Self {
        UpdatePersonError::Invalid(err)
    }
}

/// 純粋関数：登録コマンドを検証する
///
/// すべての項目が必須。メールアドレスの一意性はアプリケーション層で確認する。
pub fn validate_new_person(cmd: CreatePerson) -> Result<NewPerson, ValidationError> {
    Ok(NewPerson {
        first_name: required_text(cmd.first_name, "firstName")?,
        last_name: required_text(cmd.last_name, "lastName")?,
        alias: required_text(cmd.alias, "alias")?,
        email: required_text(cmd.email, "email")?,
    })
}

/// 純粋関数：更新コマンドを検証する
///
/// ビジネスルール：
/// - メールアドレスを含む更新は黙って無視せず拒否する
/// - 氏名と別名は必須
pub fn validate_update(cmd: UpdatePerson) -> Result<PersonPatch, UpdatePersonError> {
    if cmd.includes_email {
        return Err(UpdatePersonError::EmailImmutable);
    }

    Ok(PersonPatch {
        first_name: required_text(cmd.first_name, "firstName")?,
        last_name: required_text(cmd.last_name, "lastName")?,
        alias: required_text(cmd.alias, "alias")?,
    })
}
