use crate::application::library::{self, ServiceDependencies};
use crate::domain::{
    BookId, CategoryId, PersonId,
    commands::{LendBook, ReturnBook, UpdateBookDescription},
};
use axum::{Json, extract::State};
use std::sync::Arc;

use super::{
    error::ApiError,
    extract::{AppJson, AppPath},
    types::{
        BookResponse, CategoryRequest, CategoryResponse, CreateBookRequest, CreatePersonRequest,
        CreatedResponse, DeletedResponse, LendBookRequest, PersonResponse, UpdateBookRequest,
        UpdatePersonRequest,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

// ============================================================================
// Books
// ============================================================================

/// GET /books - 書籍一覧
pub async fn list_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let books = library::list_books(&state.service_deps).await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// GET /books/:id - 書籍詳細
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    AppPath(book_id): AppPath<i64>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = library::get_book(&state.service_deps, BookId::new(book_id)).await?;
    Ok(Json(BookResponse::from(book)))
}

/// POST /books - 書籍を登録
///
/// 強制されるビジネスルール:
/// - タイトル・説明・カテゴリが指定されていること
/// - カテゴリが存在すること
/// - personIdが0以外なら、その利用者が存在すること
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<CreateBookRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let book_id = library::create_book(&state.service_deps, req.to_command()).await?;
    Ok(Json(CreatedResponse::from(book_id)))
}

/// PUT /books/:id - 書籍の説明を更新
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    AppPath(book_id): AppPath<i64>,
    AppJson(req): AppJson<UpdateBookRequest>,
) -> Result<Json<BookResponse>, ApiError> {
    let cmd = UpdateBookDescription {
        book_id: BookId::new(book_id),
        description: req.description,
    };

    let book = library::update_book_description(&state.service_deps, cmd).await?;
    Ok(Json(BookResponse::from(book)))
}

/// PUT /books/prestar/:id - 書籍を貸し出す
///
/// 強制されるビジネスルール:
/// - 書籍が存在すること
/// - 書籍が貸出中でないこと
/// - 利用者が存在すること
pub async fn lend_book(
    State(state): State<Arc<AppState>>,
    AppPath(book_id): AppPath<i64>,
    AppJson(req): AppJson<LendBookRequest>,
) -> Result<Json<BookResponse>, ApiError> {
    let cmd = LendBook {
        book_id: BookId::new(book_id),
        person_id: req.person_id.map(PersonId::new),
        lent_at: chrono::Utc::now(),
    };

    let book = library::lend_book(&state.service_deps, cmd).await?;
    Ok(Json(BookResponse::from(book)))
}

/// PUT /books/devolver/:id - 書籍を返却する
///
/// 強制されるビジネスルール:
/// - 書籍が存在すること
/// - 書籍が貸出中であること
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    AppPath(book_id): AppPath<i64>,
) -> Result<Json<BookResponse>, ApiError> {
    let cmd = ReturnBook {
        book_id: BookId::new(book_id),
        returned_at: chrono::Utc::now(),
    };

    let book = library::return_book(&state.service_deps, cmd).await?;
    Ok(Json(BookResponse::from(book)))
}

/// DELETE /books/:id - 書籍を削除（貸出中は不可）
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    AppPath(book_id): AppPath<i64>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let book_id = library::delete_book(&state.service_deps, BookId::new(book_id)).await?;
    Ok(Json(DeletedResponse::new(book_id.value())))
}

// ============================================================================
// Persons
// ============================================================================

/// GET /persons - 利用者一覧
pub async fn list_persons(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PersonResponse>>, ApiError> {
    let persons = library::list_persons(&state.service_deps).await?;
    Ok(Json(persons.into_iter().map(PersonResponse::from).collect()))
}

/// GET /persons/:id - 利用者詳細
pub async fn get_person(
    State(state): State<Arc<AppState>>,
    AppPath(person_id): AppPath<i64>,
) -> Result<Json<PersonResponse>, ApiError> {
    let person = library::get_person(&state.service_deps, PersonId::new(person_id)).await?;
    Ok(Json(PersonResponse::from(person)))
}

/// POST /persons - 利用者を登録（メールアドレスは一意）
pub async fn create_person(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<CreatePersonRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let person_id = library::create_person(&state.service_deps, req.to_command()).await?;
    Ok(Json(CreatedResponse::from(person_id)))
}

/// PUT /persons/:id - 利用者を更新（メールアドレスは変更不可）
pub async fn update_person(
    State(state): State<Arc<AppState>>,
    AppPath(person_id): AppPath<i64>,
    AppJson(req): AppJson<UpdatePersonRequest>,
) -> Result<Json<PersonResponse>, ApiError> {
    let cmd = req.to_command(PersonId::new(person_id));
    let person = library::update_person(&state.service_deps, cmd).await?;
    Ok(Json(PersonResponse::from(person)))
}

/// DELETE /persons/:id - 利用者を削除（書籍を保持している場合は不可）
pub async fn delete_person(
    State(state): State<Arc<AppState>>,
    AppPath(person_id): AppPath<i64>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let person_id = library::delete_person(&state.service_deps, PersonId::new(person_id)).await?;
    Ok(Json(DeletedResponse::new(person_id.value())))
}

// ============================================================================
// Categories
// ============================================================================

pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let categories = library::list_categories(&state.service_deps).await?;
    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

pub async fn get_category(
    State(state): State<Arc<AppState>>,
    AppPath(category_id): AppPath<i64>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let category =
        library::get_category(&state.service_deps, CategoryId::new(category_id)).await?;
    Ok(Json(CategoryResponse::from(category)))
}

pub async fn create_category(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<CategoryRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let category_id =
        library::create_category(&state.service_deps, req.to_create_command()).await?;
    Ok(Json(CreatedResponse::from(category_id)))
}

pub async fn update_category(
    State(state): State<Arc<AppState>>,
    AppPath(category_id): AppPath<i64>,
    AppJson(req): AppJson<CategoryRequest>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let cmd = req.to_update_command(CategoryId::new(category_id));
    let category = library::update_category(&state.service_deps, cmd).await?;
    Ok(Json(CategoryResponse::from(category)))
}

/// DELETE /categories/:id - カテゴリを削除（書籍から参照されている場合は不可）
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    AppPath(category_id): AppPath<i64>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let category_id =
        library::delete_category(&state.service_deps, CategoryId::new(category_id)).await?;
    Ok(Json(DeletedResponse::new(category_id.value())))
}
