pub mod self_check;
pub mod single;

pub use single::{ingest_single_submission, UploadedBytes};
