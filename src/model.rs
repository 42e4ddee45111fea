pub mod document;
pub use document::{DocumentData, DocumentId, GroupId};
