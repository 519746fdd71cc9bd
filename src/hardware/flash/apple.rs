use objc2::rc::Retained;
use objc2_av_foundation::{AVCaptureDevice, AVCaptureTorchMode, AVMediaTypeVideo};

use super::{TorchControl, TorchError};

/// Torch control through the default AVFoundation video device.
#[derive(Debug, Clone, Copy)]
pub struct AppleTorch;

impl AppleTorch {
    fn default_device() -> Option<Retained<AVCaptureDevice>> {
        unsafe {
            let media_type = AVMediaTypeVideo?;
            AVCaptureDevice::defaultDeviceWithMediaType(media_type)
        }
    }
}

impl TorchControl for AppleTorch {
    fn has_flash_feature(&self) -> Result<bool, TorchError> {
        Ok(Self::default_device().map(|device| unsafe { device.hasTorch() }).unwrap_or(false))
    }

    fn camera_ids(&self) -> Result<Vec<String>, TorchError> {
        Ok(Self::default_device()
            .map(|device| unsafe { device.uniqueID() }.to_string())
            .into_iter()
            .collect())
    }

    fn set_torch_mode(&mut self, camera_id: &str, on: bool) -> Result<(), TorchError> {
        let unavailable = |reason: &str| TorchError::UnitUnavailable{camera_id: camera_id.to_string(), reason: reason.to_string()};

        let device = Self::default_device().ok_or_else(|| unavailable("no video device"))?;
        unsafe {
            if device.uniqueID().to_string() != camera_id {
                return Err(unavailable("camera is no longer the default video device"));
            }
            if !device.hasTorch() {
                return Err(unavailable("camera has no torch"));
            }
            let mode = if on {AVCaptureTorchMode::On} else {AVCaptureTorchMode::Off};
            if !device.isTorchModeSupported(mode) {
                return Err(unavailable("torch mode not supported"));
            }
            device
                .lockForConfiguration()
                .map_err(|e| TorchError::AccessFailed(e.localizedDescription().to_string()))?;
            device.setTorchMode(mode);
            device.unlockForConfiguration();
        }
        Ok(())
    }
}
