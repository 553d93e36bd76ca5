//! Domain models
//!
//! Entities shared between the server crate and transport adapters.
//! The `db` feature adds `sqlx::FromRow` derives on the models that map
//! one-to-one onto their table rows; models with converted columns
//! (decimal text, JSON arrays) get dedicated row structs on the server side.

pub mod cart;
pub mod category;
pub mod order;
pub mod product;
pub mod user;

pub use cart::*;
pub use category::*;
pub use order::*;
pub use product::*;
pub use user::*;
