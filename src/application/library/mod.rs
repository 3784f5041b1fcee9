mod book_service;
mod category_service;
mod errors;
mod person_service;

use crate::domain::{DomainEvent, category::Category};
use crate::ports::{BookStore, PersonStore, RecordStore};
use std::sync::Arc;

pub use book_service::{
    create_book, delete_book, get_book, lend_book, list_books, return_book,
    update_book_description,
};
pub use category_service::{
    create_category, delete_category, get_category, list_categories, update_category,
};
pub use errors::{ConflictKind, EntityKind, InvalidKind, LibraryError, Result};
pub use person_service::{create_person, delete_person, get_person, list_persons, update_person};

/// サービスの依存関係
///
/// 振る舞いは持たず、各操作の関数に明示的に渡す。
/// レコードストアはトレイトオブジェクトとして注入されるため、
/// テストではインメモリ実装に差し替えられる。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub books: Arc<dyn BookStore>,
    pub persons: Arc<dyn PersonStore>,
    pub categories: Arc<dyn RecordStore<Category>>,
}

/// 状態遷移で発生したドメインイベントを記録する
fn record_event(event: &DomainEvent) {
    match serde_json::to_string(event) {
        Ok(payload) => {
            tracing::info!(event_type = event.event_type(), %payload, "Domain event recorded")
        }
        Err(e) => tracing::warn!(
            event_type = event.event_type(),
            error = %e,
            "Failed to serialize domain event"
        ),
    }
}
