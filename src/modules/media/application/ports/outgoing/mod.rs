pub mod db;
pub mod object_store;

pub use object_store::{ObjectStore, ObjectStoreError};
