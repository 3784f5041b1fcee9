use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookId, PersonId};

/// イベント：書籍が貸し出された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLent {
    pub book_id: BookId,
    pub person_id: PersonId,
    pub lent_at: DateTime<Utc>,
}

/// イベント：書籍が返却された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookReturned {
    pub book_id: BookId,
    pub person_id: PersonId,
    pub returned_at: DateTime<Utc>,
}

/// ドメインイベント統合型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainEvent {
    BookLent(BookLent),
    BookReturned(BookReturned),
}

impl DomainEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::BookLent(_) => "BookLent",
            DomainEvent::BookReturned(_) => "BookReturned",
        }
    }
}
