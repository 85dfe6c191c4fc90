//! File listing, administration, and download.

pub mod download;
pub mod service;

pub use download::{DownloadService, FileDownload};
pub use service::FileService;
