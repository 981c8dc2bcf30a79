//! Bookshelf application library
//!
//! REST catalogue of books and the editorials that publish them, packaged as
//! kernel modules over a SeaORM store.

pub mod modules;
pub mod server;
pub mod utils;

pub use modules::{books, editorials};
