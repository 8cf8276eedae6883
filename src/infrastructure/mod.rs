//! Infrastructure layer - Store backends, services and logging

pub mod logging;
pub mod storage;
pub mod user;
