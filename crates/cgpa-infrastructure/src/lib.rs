//! Storage adapters for the CGPA record keeper.
//!
//! Implements the `cgpa-core` persistence traits over local files and
//! per-user document stores, and loads the application configuration.

pub mod config_service;
pub mod dir_document_store;
pub mod dto;
pub mod local_store;
pub mod memory_document_store;
pub mod paths;
pub mod remote_store;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::dir_document_store::DirUserDocumentStore;
pub use crate::local_store::LocalStore;
pub use crate::memory_document_store::InMemoryUserDocumentStore;
pub use crate::paths::CgpaPaths;
pub use crate::remote_store::RemoteStore;
