use std::time::Instant;

use crate::arbitrator::InputArbitrator;
use crate::config::Settings;
use crate::gate::PermissionGate;
use crate::hardware::{OsPermissions, OsTorch, PermissionSystem, TorchControl, TorchDriver};
use crate::input::{FlingDetector, Gesture, TextField, TouchPoint};
use crate::surface::{Surface, WindowSurface};
use crate::window::{self, Event, EventHandler, Input, Key, Lifetime, NamedKey, TouchPhase};

/// The single screen: a switch, a command field and the swipe area behind them.
#[derive(Debug)]
pub struct FlashlightApp<T: TorchControl = OsTorch, P: PermissionSystem = OsPermissions> {
    arbitrator: InputArbitrator<T, WindowSurface>,
    gate: PermissionGate<P>,
    gestures: FlingDetector,
    text: TextField,
    started: bool,
    unfocused: bool,
}

impl<T: TorchControl, P: PermissionSystem> FlashlightApp<T, P> {
    pub fn new(settings: &Settings, torch: T, permissions: P) -> Self {
        FlashlightApp{
            arbitrator: InputArbitrator::new(TorchDriver::new(torch), WindowSurface::new(settings.title.clone())),
            gate: PermissionGate::new(permissions),
            gestures: FlingDetector::new(settings.gesture.clone()),
            text: TextField::default(),
            started: false,
            unfocused: false,
        }
    }

    pub fn arbitrator(&self) -> &InputArbitrator<T, WindowSurface> {&self.arbitrator}
    pub fn gate(&self) -> &PermissionGate<P> {&self.gate}

    /// The first resume runs the permission check; later ones let a pending request settle.
    pub fn resumed(&mut self) {
        if self.started {
            self.gate.resumed();
        } else {
            self.started = true;
            self.gate.check_on_start();
        }
    }

    /// A system dialog takes focus without pausing the activity, so regaining focus
    /// also lets a pending request settle.
    pub fn focused(&mut self, focused: bool) {
        if !focused {
            self.unfocused = true;
        } else if std::mem::take(&mut self.unfocused) && self.started {
            self.gate.resumed();
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.gate.poll(self.arbitrator.surface_mut());
        self.arbitrator.surface_mut().expire(now);
    }

    /// Returns whether the touch completed a gesture that was handled.
    pub fn on_touch(&mut self, id: u64, phase: TouchPhase, point: TouchPoint, at: Instant) -> bool {
        match self.gestures.on_touch(id, phase, point, at) {
            Some(Gesture::Tap) => {
                self.toggle_switch();
                true
            },
            Some(Gesture::Fling(fling)) => self.arbitrator.on_fling(&fling, self.gestures.config()),
            None => false,
        }
    }

    pub fn on_key(&mut self, key: &Key, text: Option<&str>) {
        let edited = match key {
            Key::Named(NamedKey::Tab) => {
                self.toggle_switch();
                return;
            },
            Key::Named(NamedKey::Backspace) => self.text.backspace(),
            Key::Named(NamedKey::Escape) => self.text.clear(),
            _ => text.is_some_and(|text| self.text.insert(text)),
        };
        if edited {
            self.arbitrator.surface_mut().show_text(self.text.as_str());
            self.arbitrator.on_text(self.text.as_str());
        }
    }

    fn toggle_switch(&mut self) {
        let checked = !self.arbitrator.surface().switch_position();
        self.arbitrator.on_switch(checked);
    }
}

impl<T: TorchControl, P: PermissionSystem> EventHandler for FlashlightApp<T, P> {
    fn event(&mut self, ctx: &window::Context, event: Event) {
        match event {
            Event::Lifetime(Lifetime::Resumed) => {
                self.arbitrator.surface_mut().attach(ctx.handle.clone());
                self.resumed();
            },
            Event::Lifetime(Lifetime::Draw) => self.tick(Instant::now()),
            Event::Lifetime(Lifetime::Paused) => log::debug!("paused"),
            Event::Lifetime(Lifetime::Close) => log::info!("closing"),
            Event::Input(Input::Touch{id, phase, position: (x, y)}) => {
                let ended = matches!(phase, TouchPhase::Ended);
                if !self.on_touch(id, phase, TouchPoint::new(x, y), Instant::now()) && ended {
                    log::trace!("touch {id} fell through");
                }
            },
            Event::Input(Input::Key{key, text}) => self.on_key(&key, text.as_deref()),
            Event::Input(Input::Focused(focused)) => self.focused(focused),
        }
    }
}
