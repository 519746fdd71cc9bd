use std::sync::Arc;
use std::time::Instant;

use crate::notice::Notice;
use crate::window::Window;

/// What the user sees: the switch, the text field and transient notices.
pub trait Surface {
    /// Moves the switch without reporting a toggle back to the application.
    fn set_switch(&mut self, on: bool);
    fn switch_position(&self) -> bool;
    fn show_text(&mut self, _text: &str) {}
    fn notice(&mut self, notice: Notice);
}

/// Renders the whole surface into the window title.
///
/// Works without a window attached, which is the state before the first resume.
#[derive(Debug)]
pub struct WindowSurface {
    handle: Option<Arc<Window>>,
    title: String,
    switch: bool,
    text: String,
    notice: Option<(Notice, Instant)>,
}

impl WindowSurface {
    pub fn new(title: impl Into<String>) -> Self {
        WindowSurface{handle: None, title: title.into(), switch: false, text: String::new(), notice: None}
    }

    pub fn attach(&mut self, handle: Arc<Window>) {
        self.handle = Some(handle);
        self.redraw();
    }

    pub fn active_notice(&self) -> Option<&Notice> {
        self.notice.as_ref().map(|(notice, _)| notice)
    }

    /// Drops the current notice once its display time has run out.
    pub fn expire(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|(notice, shown)| now.saturating_duration_since(*shown) >= notice.length.duration()) {
            self.notice = None;
            self.redraw();
        }
    }

    pub fn caption(&self) -> String {
        let mut caption = format!("{} [{}]", self.title, if self.switch {"ON"} else {"OFF"});
        if !self.text.is_empty() {
            caption.push_str(&format!(" > {}", self.text));
        }
        if let Some(notice) = self.active_notice() {
            caption.push_str(&format!(" | {notice}"));
        }
        caption
    }

    fn redraw(&self) {
        if let Some(handle) = &self.handle {
            handle.set_title(&self.caption());
        }
    }
}

impl Surface for WindowSurface {
    fn set_switch(&mut self, on: bool) {
        self.switch = on;
        self.redraw();
    }

    fn switch_position(&self) -> bool {self.switch}

    fn show_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.redraw();
    }

    fn notice(&mut self, notice: Notice) {
        log::info!("notice: {notice}");
        self.notice = Some((notice, Instant::now()));
        self.redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn caption_shows_everything_visible() {
        let mut surface = WindowSurface::new("Flashlight");
        assert_eq!(surface.caption(), "Flashlight [OFF]");

        surface.set_switch(true);
        surface.show_text("on");
        surface.notice(Notice::short("Flashlight not available"));
        assert_eq!(surface.caption(), "Flashlight [ON] > on | Flashlight not available");
    }

    #[test]
    fn notices_expire_after_their_length() {
        let mut surface = WindowSurface::new("Flashlight");
        surface.notice(Notice::long("Camera permission is required to use flashlight"));

        surface.expire(Instant::now() + Duration::from_millis(2500));
        assert!(surface.active_notice().is_some());
        surface.expire(Instant::now() + Duration::from_millis(3600));
        assert!(surface.active_notice().is_none());
    }
}
