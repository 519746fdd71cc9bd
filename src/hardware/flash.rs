#[cfg(target_os = "android")]
mod android;
#[cfg(target_os = "android")]
use android::AndroidTorch;

#[cfg(any(target_os = "ios", target_os = "macos"))]
mod apple;
#[cfg(any(target_os = "ios", target_os = "macos"))]
use apple::AppleTorch;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
pub use linux::LinuxTorch;

use thiserror::Error;

use crate::config::TorchConfig;
use crate::hardware::HardwareError;
use crate::notice::Notice;

#[derive(Debug, Error)]
pub enum TorchError {
    #[error("device has no flash hardware")]
    NoFlashFeature,

    #[error("device reports no cameras")]
    NoCamera,

    #[error("camera access failed: {0}")]
    AccessFailed(String),

    #[error("flash unit not available on camera {camera_id}: {reason}")]
    UnitUnavailable {camera_id: String, reason: String},
}

impl TorchError {
    /// The notice shown to the user when this error is recovered from.
    pub fn notice(&self) -> Notice {
        match self {
            TorchError::NoFlashFeature | TorchError::NoCamera => Notice::short("No flashlight available on this device"),
            TorchError::AccessFailed(_) => Notice::short("Flashlight not available"),
            TorchError::UnitUnavailable{..} => Notice::short("Flash unit not available on this camera"),
        }
    }
}

/// The platform's camera torch API.
///
/// Implementations report hardware access failures as [`TorchError::AccessFailed`] and a
/// camera without a usable flash unit as [`TorchError::UnitUnavailable`].
pub trait TorchControl {
    /// Device-wide capability query, independent of any particular camera.
    fn has_flash_feature(&self) -> Result<bool, TorchError>;
    fn camera_ids(&self) -> Result<Vec<String>, TorchError>;
    fn set_torch_mode(&mut self, camera_id: &str, on: bool) -> Result<(), TorchError>;
}

/// Applies a flashlight state to the first camera the platform reports.
#[derive(Debug)]
pub struct TorchDriver<T: TorchControl> {
    control: T,
}

impl<T: TorchControl> TorchDriver<T> {
    pub fn new(control: T) -> Self {
        TorchDriver{control}
    }

    pub fn control(&self) -> &T {&self.control}

    pub fn apply_state(&mut self, on: bool) -> Result<(), TorchError> {
        if !self.control.has_flash_feature()? {
            return Err(TorchError::NoFlashFeature);
        }
        let camera_id = self.control.camera_ids()?.into_iter().next().ok_or(TorchError::NoCamera)?;
        log::debug!("setting torch on camera {camera_id} to {on}");
        self.control.set_torch_mode(&camera_id, on)
    }
}

/// Torch backend for the platform this build targets.
#[derive(Debug)]
pub struct OsTorch(
    #[cfg(target_os = "android")]
    AndroidTorch,
    #[cfg(any(target_os = "ios", target_os = "macos"))]
    AppleTorch,
    #[cfg(target_os = "linux")]
    LinuxTorch,
);

impl OsTorch {
    pub(crate) fn new(config: &TorchConfig) -> Result<Self, HardwareError> {
        let _ = config;
        Ok(Self(
            #[cfg(target_os = "android")]
            AndroidTorch::new().map_err(|e| HardwareError::Platform(e.to_string()))?,
            #[cfg(any(target_os = "ios", target_os = "macos"))]
            AppleTorch,
            #[cfg(target_os = "linux")]
            LinuxTorch::new(config.leds_path.clone()),
        ))
    }
}

impl TorchControl for OsTorch {
    fn has_flash_feature(&self) -> Result<bool, TorchError> {
        #[cfg(any(target_os = "android", target_os = "ios", target_os = "macos", target_os = "linux"))]
        {
            self.0.has_flash_feature()
        }
        #[cfg(not(any(target_os = "android", target_os = "ios", target_os = "macos", target_os = "linux")))]
        {
            Ok(false)
        }
    }

    fn camera_ids(&self) -> Result<Vec<String>, TorchError> {
        #[cfg(any(target_os = "android", target_os = "ios", target_os = "macos", target_os = "linux"))]
        {
            self.0.camera_ids()
        }
        #[cfg(not(any(target_os = "android", target_os = "ios", target_os = "macos", target_os = "linux")))]
        {
            Ok(Vec::new())
        }
    }

    fn set_torch_mode(&mut self, camera_id: &str, on: bool) -> Result<(), TorchError> {
        #[cfg(any(target_os = "android", target_os = "ios", target_os = "macos", target_os = "linux"))]
        {
            self.0.set_torch_mode(camera_id, on)
        }
        #[cfg(not(any(target_os = "android", target_os = "ios", target_os = "macos", target_os = "linux")))]
        {
            let _ = (camera_id, on);
            Err(TorchError::NoFlashFeature)
        }
    }
}
