use block2::RcBlock;
use objc2::runtime::Bool;
use objc2_av_foundation::{AVAuthorizationStatus, AVCaptureDevice, AVMediaTypeVideo};
use std::sync::mpsc::Sender;

use super::{Permission, PermissionResponse, PermissionResult, PermissionSystem, RequestId};

/// Camera authorization through AVFoundation.
#[derive(Debug, Clone, Copy)]
pub struct ApplePermissions;

impl PermissionSystem for ApplePermissions {
    fn is_granted(&self, permission: Permission) -> bool {
        match permission {
            Permission::Camera => unsafe {
                match AVMediaTypeVideo {
                    Some(media_type) => AVCaptureDevice::authorizationStatusForMediaType(media_type) == AVAuthorizationStatus::Authorized,
                    None => false,
                }
            },
        }
    }

    fn request(&mut self, permission: Permission, request: RequestId, reply: Sender<PermissionResponse>) {
        let Permission::Camera = permission;
        let Some(media_type) = (unsafe { AVMediaTypeVideo }) else {
            let _ = reply.send(PermissionResponse{request, result: PermissionResult::Denied});
            return;
        };
        let handler = RcBlock::new(move |granted: Bool| {
            let result = if granted.as_bool() {PermissionResult::Granted} else {PermissionResult::Denied};
            let _ = reply.send(PermissionResponse{request, result});
        });
        unsafe { AVCaptureDevice::requestAccessForMediaType_completionHandler(media_type, &handler) };
    }
}
