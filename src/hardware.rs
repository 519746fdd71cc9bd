mod flash;
mod logger;
mod permission;

use thiserror::Error;

pub use flash::{OsTorch, TorchControl, TorchDriver, TorchError};
#[cfg(target_os = "linux")]
pub use flash::LinuxTorch;
pub use logger::Logger;
pub use permission::{OsPermissions, Permission, PermissionResponse, PermissionResult, PermissionSystem, RequestId};

use crate::config::Settings;

#[derive(Debug, Error)]
pub enum HardwareError {
    #[error("platform initialisation failed: {0}")]
    Platform(String),
}

/// Hardware context contains the platform interfaces the application drives.
#[derive(Debug)]
pub struct Context {
    pub torch: OsTorch,
    pub permissions: OsPermissions,
}

impl Context {
    pub(crate) fn new(settings: &Settings) -> Result<Self, HardwareError> {
        Ok(Self {
            torch: OsTorch::new(&settings.torch)?,
            permissions: OsPermissions::new()?,
        })
    }
}
