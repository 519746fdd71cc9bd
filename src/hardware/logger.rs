// Cross platform logger setup.
//
// Android logs to logcat through android_logger, everything else writes to stderr
// through env_logger. RUST_LOG still wins over the configured level on desktop.

pub struct Logger;

impl Logger {
    pub fn start(level: Option<log::Level>) {
        let level = level.unwrap_or(log::Level::Warn);
        #[cfg(target_os = "android")]
        {
            android_logger::init_once(
                android_logger::Config::default()
                    .with_max_level(level.to_level_filter())
                    .with_tag("torchlight"),
            );
        }

        #[cfg(not(target_os = "android"))]
        {
            let _ = env_logger::Builder::new()
                .filter_level(level.to_level_filter())
                .parse_default_env()
                .try_init();
        }
    }
}
