use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{TorchControl, TorchError};

/// Flash LEDs exposed through the sysfs LED class.
///
/// Every LED whose name mentions `flash` or `torch` counts as a camera flash unit,
/// identified by its directory name.
#[derive(Debug, Clone)]
pub struct LinuxTorch {
    root: PathBuf,
}

impl LinuxTorch {
    pub fn new(root: PathBuf) -> Self {
        LinuxTorch{root}
    }

    fn leds(&self) -> Result<Vec<String>, std::io::Error> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        let mut leds = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| {
                let name = name.to_ascii_lowercase();
                name.contains("flash") || name.contains("torch")
            })
            .collect::<Vec<_>>();
        leds.sort();
        Ok(leds)
    }

    fn max_brightness(&self, led: &str) -> Result<String, std::io::Error> {
        let raw = fs::read_to_string(self.root.join(led).join("max_brightness"))?;
        Ok(raw.trim().to_string())
    }
}

fn map_io(camera_id: &str, error: std::io::Error) -> TorchError {
    match error.kind() {
        ErrorKind::NotFound => TorchError::UnitUnavailable{camera_id: camera_id.to_string(), reason: error.to_string()},
        _ => TorchError::AccessFailed(error.to_string()),
    }
}

impl TorchControl for LinuxTorch {
    fn has_flash_feature(&self) -> Result<bool, TorchError> {
        self.leds().map(|leds| !leds.is_empty()).map_err(|e| TorchError::AccessFailed(e.to_string()))
    }

    fn camera_ids(&self) -> Result<Vec<String>, TorchError> {
        self.leds().map_err(|e| TorchError::AccessFailed(e.to_string()))
    }

    fn set_torch_mode(&mut self, camera_id: &str, on: bool) -> Result<(), TorchError> {
        let value = match on {
            true => self.max_brightness(camera_id).map_err(|e| map_io(camera_id, e))?,
            false => "0".to_string(),
        };
        fs::write(self.root.join(camera_id).join("brightness"), value).map_err(|e| map_io(camera_id, e))
    }
}
