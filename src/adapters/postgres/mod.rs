pub mod book_store;
pub mod category_store;
pub mod person_store;

// パブリックに型を再エクスポート
pub use book_store::BookStore as PostgresBookStore;
pub use category_store::CategoryStore as PostgresCategoryStore;
pub use person_store::PersonStore as PostgresPersonStore;
