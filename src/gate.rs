use std::sync::mpsc::{channel, Receiver, Sender};

use crate::hardware::{Permission, PermissionResponse, PermissionResult, PermissionSystem, RequestId};
use crate::notice::Notice;
use crate::surface::Surface;

pub const CAMERA_REQUEST_CODE: RequestId = 200;

/// Asks for camera access once at start-up and reports the answer.
///
/// The answer is only ever shown to the user. It does not gate the flashlight, and a denial
/// is never retried; the user has to grant access from the system settings.
#[derive(Debug)]
pub struct PermissionGate<P: PermissionSystem> {
    system: P,
    pending: Option<RequestId>,
    sender: Sender<PermissionResponse>,
    receiver: Receiver<PermissionResponse>,
}

impl<P: PermissionSystem> PermissionGate<P> {
    pub fn new(system: P) -> Self {
        let (sender, receiver) = channel();
        PermissionGate{system, pending: None, sender, receiver}
    }

    pub fn system(&self) -> &P {&self.system}
    pub fn is_pending(&self) -> bool {self.pending.is_some()}

    /// Returns whether a request was issued.
    pub fn check_on_start(&mut self) -> bool {
        if self.system.is_granted(Permission::Camera) {
            log::debug!("camera permission already granted");
            return false;
        }
        log::info!("requesting camera permission");
        self.pending = Some(CAMERA_REQUEST_CODE);
        self.system.request(Permission::Camera, CAMERA_REQUEST_CODE, self.sender.clone());
        true
    }

    pub fn resumed(&mut self) {
        self.system.resumed();
    }

    /// Handles every answer that has arrived since the last poll.
    pub fn poll(&mut self, surface: &mut impl Surface) {
        while let Ok(response) = self.receiver.try_recv() {
            self.on_result(response, surface);
        }
    }

    /// Answers for unknown or already answered requests are dropped.
    pub fn on_result(&mut self, response: PermissionResponse, surface: &mut impl Surface) -> Option<PermissionResult> {
        if self.pending != Some(response.request) {
            log::debug!("ignoring permission response for request {}", response.request);
            return None;
        }
        self.pending = None;
        match response.result {
            PermissionResult::Granted => {
                log::info!("camera permission granted");
                surface.notice(Notice::short("Camera permission granted"));
            },
            PermissionResult::Denied => {
                log::warn!("camera permission denied");
                surface.notice(Notice::long("Camera permission is required to use flashlight"));
            },
        }
        Some(response.result)
    }
}
