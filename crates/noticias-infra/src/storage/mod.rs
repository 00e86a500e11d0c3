//! Image storage implementations.

mod local;

pub use local::{LocalImageStore, stored_file_name};
