//! Test doubles for the platform seams.

use std::sync::mpsc::Sender;

use crate::hardware::{Permission, PermissionResponse, PermissionResult, PermissionSystem, RequestId, TorchControl, TorchError};
use crate::notice::Notice;
use crate::surface::Surface;

#[derive(Debug)]
pub struct FakeTorch {
    pub has_flash: bool,
    pub cameras: Vec<String>,
    pub fail_with: Option<fn(&str) -> TorchError>,
    /// Every attempted call, including the ones that failed.
    pub calls: Vec<(String, bool)>,
}

impl Default for FakeTorch {
    fn default() -> Self {
        FakeTorch{has_flash: true, cameras: vec!["0".to_string(), "1".to_string()], fail_with: None, calls: Vec::new()}
    }
}

impl TorchControl for FakeTorch {
    fn has_flash_feature(&self) -> Result<bool, TorchError> {Ok(self.has_flash)}

    fn camera_ids(&self) -> Result<Vec<String>, TorchError> {Ok(self.cameras.clone())}

    fn set_torch_mode(&mut self, camera_id: &str, on: bool) -> Result<(), TorchError> {
        self.calls.push((camera_id.to_string(), on));
        match self.fail_with {
            Some(fail) => Err(fail(camera_id)),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub switch: bool,
    pub text: String,
    pub notices: Vec<Notice>,
}

impl Surface for RecordingSurface {
    fn set_switch(&mut self, on: bool) {self.switch = on;}
    fn switch_position(&self) -> bool {self.switch}
    fn show_text(&mut self, text: &str) {self.text = text.to_string();}
    fn notice(&mut self, notice: Notice) {self.notices.push(notice);}
}

/// Holds requests until the test answers them.
#[derive(Debug, Default)]
pub struct FakePermissions {
    pub granted: bool,
    pub requests: Vec<(Permission, RequestId)>,
    pub reply: Option<Sender<PermissionResponse>>,
    pub resumes: usize,
    /// Answer sent for a pending request on the next resume.
    pub answer_on_resume: Option<PermissionResult>,
}

impl PermissionSystem for FakePermissions {
    fn is_granted(&self, _permission: Permission) -> bool {self.granted}

    fn request(&mut self, permission: Permission, request: RequestId, reply: Sender<PermissionResponse>) {
        self.requests.push((permission, request));
        self.reply = Some(reply);
    }

    fn resumed(&mut self) {
        self.resumes += 1;
        if let (Some(result), Some(reply)) = (self.answer_on_resume, self.reply.take()) {
            let request = self.requests.last().map(|(_, request)| *request).unwrap_or_default();
            let _ = reply.send(PermissionResponse{request, result});
        }
    }
}
