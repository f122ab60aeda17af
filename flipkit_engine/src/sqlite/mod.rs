//! SQLite database module for the FlipKit engine.

mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
