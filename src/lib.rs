mod state;
pub use state::FlashlightState;

pub mod config;
pub use config::{Settings, ConfigError, GestureConfig, TorchConfig};

pub mod hardware;
pub use hardware::{Logger, TorchControl, TorchDriver, TorchError, PermissionSystem, PermissionResult};

pub mod input;
pub mod notice;
pub use notice::{Notice, NoticeLength};

pub mod surface;
pub use surface::{Surface, WindowSurface};

pub mod arbitrator;
pub use arbitrator::InputArbitrator;

pub mod gate;
pub use gate::PermissionGate;

pub mod app;
pub use app::FlashlightApp;

pub mod window;
use window::WindowManager;

#[cfg(test)]
mod testing;

#[cfg(target_os = "android")]
use winit::platform::android::activity::AndroidApp;

/// Loads settings, starts logging and runs the event loop until the window closes.
pub fn start(
    #[cfg(target_os = "android")]
    app: AndroidApp
) {
    let loaded = Settings::load();
    let settings = loaded.as_ref().cloned().unwrap_or_default();
    Logger::start(Some(settings.log_level()));
    if let Err(e) = &loaded {
        log::warn!("{e}, using default settings");
    }

    let hardware = match hardware::Context::new(&settings) {
        Ok(hardware) => hardware,
        Err(e) => {
            log::error!("{e}");
            return;
        }
    };
    let handler = FlashlightApp::new(&settings, hardware.torch, hardware.permissions);

    if let Err(e) = WindowManager::start(
        #[cfg(target_os = "android")]
        app,
        handler,
        settings.title.clone(),
    ) {
        log::error!("event loop failed: {e}");
    }
}

#[cfg(target_os = "android")]
#[unsafe(no_mangle)]
pub fn android_main(app: AndroidApp) {
    start(app)
}

#[cfg(target_os = "ios")]
#[unsafe(no_mangle)]
pub extern "C" fn ios_main() {
    start()
}
