pub mod book;
pub mod category;
pub mod commands;
pub mod errors;
pub mod events;
pub mod person;
pub mod validation;
pub mod value_objects;

pub use errors::*;
pub use events::*;
pub use value_objects::*;
