#[cfg(target_os = "android")]
mod android;
#[cfg(target_os = "android")]
use android::AndroidPermissions;

#[cfg(any(target_os = "ios", target_os = "macos"))]
mod apple;
#[cfg(any(target_os = "ios", target_os = "macos"))]
use apple::ApplePermissions;

use std::sync::mpsc::Sender;

use crate::hardware::HardwareError;

pub type RequestId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Camera,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionResult {
    Granted,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionResponse {
    pub request: RequestId,
    pub result: PermissionResult,
}

/// The platform's runtime permission API.
///
/// `request` returns immediately; the answer is sent on `reply` exactly once, from whatever
/// thread the platform happens to deliver it on.
pub trait PermissionSystem {
    fn is_granted(&self, permission: Permission) -> bool;
    fn request(&mut self, permission: Permission, request: RequestId, reply: Sender<PermissionResponse>);
    /// Called when the application comes back to the foreground.
    fn resumed(&mut self) {}
}

/// Permission backend for the platform this build targets.
///
/// Platforms without runtime permissions grant everything.
#[derive(Debug)]
pub struct OsPermissions(
    #[cfg(target_os = "android")]
    AndroidPermissions,
    #[cfg(any(target_os = "ios", target_os = "macos"))]
    ApplePermissions,
);

impl OsPermissions {
    pub(crate) fn new() -> Result<Self, HardwareError> {
        Ok(Self(
            #[cfg(target_os = "android")]
            AndroidPermissions::new().map_err(|e| HardwareError::Platform(e.to_string()))?,
            #[cfg(any(target_os = "ios", target_os = "macos"))]
            ApplePermissions,
        ))
    }
}

impl PermissionSystem for OsPermissions {
    fn is_granted(&self, permission: Permission) -> bool {
        #[cfg(any(target_os = "android", target_os = "ios", target_os = "macos"))]
        {
            self.0.is_granted(permission)
        }
        #[cfg(not(any(target_os = "android", target_os = "ios", target_os = "macos")))]
        {
            let _ = permission;
            true
        }
    }

    fn request(&mut self, permission: Permission, request: RequestId, reply: Sender<PermissionResponse>) {
        #[cfg(any(target_os = "android", target_os = "ios", target_os = "macos"))]
        {
            self.0.request(permission, request, reply)
        }
        #[cfg(not(any(target_os = "android", target_os = "ios", target_os = "macos")))]
        {
            let _ = permission;
            let _ = reply.send(PermissionResponse{request, result: PermissionResult::Granted});
        }
    }

    fn resumed(&mut self) {
        #[cfg(any(target_os = "android", target_os = "ios", target_os = "macos"))]
        self.0.resumed();
    }
}
