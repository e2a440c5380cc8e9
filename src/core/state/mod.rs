// Run status persistence

pub mod store;

pub use store::{ExportStatus, RunMeta, StatusStore, META_FILE_NAME};
