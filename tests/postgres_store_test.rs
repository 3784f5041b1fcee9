//! PostgreSQLレコードストアのテスト
//!
//! 実行にはデータベースが必要:
//! `DATABASE_URL=postgres://... cargo test --test postgres_store_test -- --ignored`

use rusty_library_lending::adapters::postgres::{
    PostgresBookStore, PostgresCategoryStore, PostgresPersonStore,
};
use rusty_library_lending::domain::book::{BookPatch, NewBook};
use rusty_library_lending::domain::category::NewCategory;
use rusty_library_lending::domain::person::{NewPerson, PersonPatch};
use rusty_library_lending::domain::*;
use rusty_library_lending::ports::{BookStore, PersonStore, RecordStore};
use serial_test::serial;
use sqlx::PgPool;

mod common;

/// テストの独立性を保つため、各テスト前にすべてのデータを削除します。
async fn cleanup_database(pool: &PgPool) {
    sqlx::query("TRUNCATE TABLE books, persons, categories RESTART IDENTITY CASCADE")
        .execute(pool)
        .await
        .expect("Failed to truncate tables");
}

async fn setup() -> (PostgresBookStore, PostgresPersonStore, PostgresCategoryStore) {
    let pool = common::create_test_pool().await;
    cleanup_database(&pool).await;

    (
        PostgresBookStore::new(pool.clone()),
        PostgresPersonStore::new(pool.clone()),
        PostgresCategoryStore::new(pool),
    )
}

async fn insert_category(categories: &PostgresCategoryStore) -> CategoryId {
    categories
        .insert(NewCategory {
            name: "Novela".to_string(),
        })
        .await
        .unwrap()
}

async fn insert_person(persons: &PostgresPersonStore, email: &str) -> PersonId {
    persons
        .insert(NewPerson {
            first_name: "Julio".to_string(),
            last_name: "Cortázar".to_string(),
            alias: "cronopio".to_string(),
            email: email.to_string(),
        })
        .await
        .unwrap()
}

async fn insert_book(books: &PostgresBookStore, category_id: CategoryId) -> BookId {
    books
        .insert(NewBook {
            title: "Rayuela".to_string(),
            description: "Novela".to_string(),
            category_id,
            holder: Holder::Available,
        })
        .await
        .unwrap()
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_book_roundtrip_and_description_update() {
    let (books, _, categories) = setup().await;
    let category_id = insert_category(&categories).await;
    let book_id = insert_book(&books, category_id).await;

    let updated = books
        .update_fields(
            book_id,
            BookPatch {
                description: "Contranovela".to_string(),
            },
        )
        .await
        .unwrap();
    assert!(updated);

    let book = books.get(book_id).await.unwrap().unwrap();
    assert_eq!(book.description, "Contranovela");
    assert_eq!(book.holder, Holder::Available);
    assert_eq!(books.list().await.unwrap().len(), 1);
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_conditional_holder_updates() {
    let (books, persons, categories) = setup().await;
    let category_id = insert_category(&categories).await;
    let first = insert_person(&persons, "a@example.com").await;
    let second = insert_person(&persons, "b@example.com").await;
    let book_id = insert_book(&books, category_id).await;

    // 貸出可能な場合のみ成功する
    assert!(books.lend_if_available(book_id, first).await.unwrap());
    assert!(!books.lend_if_available(book_id, second).await.unwrap());
    assert_eq!(
        books.get(book_id).await.unwrap().unwrap().holder,
        Holder::LentTo(first)
    );

    // 保持者は削除できず、保持していない利用者は削除できる
    assert!(!persons.delete_if_holds_nothing(first).await.unwrap());
    assert!(persons.delete_if_holds_nothing(second).await.unwrap());
    assert!(persons.get(second).await.unwrap().is_none());

    // 貸出中は削除できない
    assert!(!books.delete_if_available(book_id).await.unwrap());

    // 返却は貸出中の場合のみ成功する
    assert!(books.release_if_lent(book_id).await.unwrap());
    assert!(!books.release_if_lent(book_id).await.unwrap());

    assert!(books.any_in_category(category_id).await.unwrap());
    assert!(books.delete_if_available(book_id).await.unwrap());
    assert!(books.get(book_id).await.unwrap().is_none());
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_person_update_keeps_email() {
    let (_, persons, _) = setup().await;
    let person_id = insert_person(&persons, "cronopio@example.com").await;

    persons
        .update_fields(
            person_id,
            PersonPatch {
                first_name: "J.".to_string(),
                last_name: "C.".to_string(),
                alias: "fama".to_string(),
            },
        )
        .await
        .unwrap();

    let person = persons
        .find_by_email("cronopio@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(person.id, person_id);
    assert_eq!(person.alias, "fama");

    assert!(persons.delete(person_id).await.unwrap());
    assert!(!persons.delete(person_id).await.unwrap());
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_lend_to_deleted_person_is_rejected() {
    let (books, persons, categories) = setup().await;
    let category_id = insert_category(&categories).await;
    let person_id = insert_person(&persons, "fama@example.com").await;
    let book_id = insert_book(&books, category_id).await;

    assert!(persons.delete_if_holds_nothing(person_id).await.unwrap());
    assert!(!persons.delete_if_holds_nothing(person_id).await.unwrap());

    assert!(!books.lend_if_available(book_id, person_id).await.unwrap());
    assert_eq!(
        books.get(book_id).await.unwrap().unwrap().holder,
        Holder::Available
    );
}
