// Library for tests to access modules

pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod reconciler;
pub mod routes;
pub mod version;
