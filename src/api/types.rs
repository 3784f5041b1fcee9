use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{
    BookId, CategoryId, PersonId,
    book::Book,
    category::Category,
    commands::{CreateBook, CreateCategory, CreatePerson, UpdateCategory, UpdatePerson},
    person::Person,
};

// ============================================================================
// Requests
// ============================================================================

/// POST /books
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    /// 省略・null・0 のいずれも「貸出されていない」
    pub person_id: Option<i64>,
}

impl CreateBookRequest {
    pub fn to_command(&self) -> CreateBook {
        CreateBook {
            title: self.title.clone(),
            description: self.description.clone(),
            category_id: self.category_id.map(CategoryId::new),
            person_id: self.person_id.map(PersonId::new),
        }
    }
}

/// PUT /books/:id
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBookRequest {
    pub description: Option<String>,
}

/// PUT /books/prestar/:id
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LendBookRequest {
    pub person_id: Option<i64>,
}

/// POST /persons
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub alias: Option<String>,
    pub email: Option<String>,
}

impl CreatePersonRequest {
    pub fn to_command(&self) -> CreatePerson {
        CreatePerson {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            alias: self.alias.clone(),
            email: self.email.clone(),
        }
    }
}

/// キーが存在すれば値がnullでも `Some` にする
fn present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

/// PUT /persons/:id
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePersonRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub alias: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub email: Option<serde_json::Value>,
}

impl UpdatePersonRequest {
    pub fn to_command(&self, person_id: PersonId) -> UpdatePerson {
        UpdatePerson {
            person_id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            alias: self.alias.clone(),
            includes_email: self.email.is_some(),
        }
    }
}

/// POST /categories と PUT /categories/:id
#[derive(Debug, Default, Deserialize)]
pub struct CategoryRequest {
    pub name: Option<String>,
}

impl CategoryRequest {
    pub fn to_create_command(&self) -> CreateCategory {
        CreateCategory {
            name: self.name.clone(),
        }
    }

    pub fn to_update_command(&self, category_id: CategoryId) -> UpdateCategory {
        UpdateCategory {
            category_id,
            name: self.name.clone(),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// 書籍レスポンス
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category_id: i64,
    /// 貸出されていない場合は 0
    pub person_id: i64,
    /// "available" または "lent"
    pub state: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id.value(),
            state: book.state().as_str().to_string(),
            title: book.title,
            description: book.description,
            category_id: book.category_id.value(),
            person_id: book.holder.to_raw(),
        }
    }
}

/// 利用者レスポンス
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub alias: String,
    pub email: String,
}

impl From<Person> for PersonResponse {
    fn from(person: Person) -> Self {
        Self {
            id: person.id.value(),
            first_name: person.first_name,
            last_name: person.last_name,
            alias: person.alias,
            email: person.email,
        }
    }
}

/// カテゴリレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.value(),
            name: category.name,
        }
    }
}

/// 登録レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: i64,
}

impl From<BookId> for CreatedResponse {
    fn from(id: BookId) -> Self {
        Self { id: id.value() }
    }
}

impl From<PersonId> for CreatedResponse {
    fn from(id: PersonId) -> Self {
        Self { id: id.value() }
    }
}

impl From<CategoryId> for CreatedResponse {
    fn from(id: CategoryId) -> Self {
        Self { id: id.value() }
    }
}

/// 削除レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub id: i64,
    pub deleted: bool,
}

impl DeletedResponse {
    pub fn new(id: i64) -> Self {
        Self { id, deleted: true }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
