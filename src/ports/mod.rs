pub mod book_store;
pub mod person_store;
pub mod record_store;

pub use book_store::*;
pub use person_store::*;
pub use record_store::*;
