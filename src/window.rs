use winit::window::WindowId;
use winit::event::{WindowEvent, StartCause, ElementState, MouseButton};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::application::ApplicationHandler;
use winit::error::EventLoopError;

#[cfg(target_os="android")]
use winit::platform::android::activity::AndroidApp;
#[cfg(target_os="android")]
use winit::platform::android::EventLoopBuilderExtAndroid;

use std::time::Instant;
use std::time::Duration;
use std::sync::Arc;

pub use winit::event::TouchPhase;
pub use winit::keyboard::{NamedKey, SmolStr, Key};
pub use winit::window::Window;

const TICK: Duration = Duration::from_millis(50);

/// Touch id given to the mouse, which winit reports separately from touches.
pub const MOUSE_TOUCH_ID: u64 = u64::MAX;

///Window Context holds the window handle. Each resume creates a new Context.
#[derive(Clone)]
pub struct Context {
    pub handle: Arc<Window>,
}

#[derive(Clone, Debug)]
pub enum Event {
    Lifetime(Lifetime),
    Input(Input),
}

#[derive(Clone, Debug)]
pub enum Lifetime {
    ///Window was created and is ready for the first frame
    Resumed,
    ///App was paused, the window is about to go away
    Paused,
    ///App is being closed and the window is or has been destroyed
    Close,
    ///Periodic tick
    Draw,
}

#[derive(Clone, Debug)]
pub enum Input {
    ///Touches, plus the left mouse button on desktop
    Touch{id: u64, phase: TouchPhase, position: (f64, f64)},
    ///Key presses only, releases are dropped
    Key{key: Key, text: Option<SmolStr>},
    ///Window gained or lost input focus, e.g. behind a system dialog
    Focused(bool),
}

pub trait EventHandler {
    fn event(&mut self, ctx: &Context, event: Event);
}

pub struct WindowManager<E: EventHandler + 'static> {
    #[cfg(target_os = "android")]
    app: AndroidApp,
    context: Option<Context>,
    event_handler: E,
    title: String,
    pause: bool,
    cursor: (f64, f64),
    mouse_down: bool,
}

impl<E: EventHandler> WindowManager<E> {
    pub fn start(
        #[cfg(target_os = "android")]
        app: AndroidApp,
        event_handler: E,
        title: String,
    ) -> Result<(), EventLoopError> {
        WindowManager{
            #[cfg(target_os = "android")]
            app,
            context: None,
            event_handler,
            title,
            pause: false,
            cursor: (0.0, 0.0),
            mouse_down: false,
        }.start_loop()
    }

    #[cfg(target_os = "android")]
    fn start_loop(mut self) -> Result<(), EventLoopError> {
        let event_loop = EventLoop::builder().with_android_app(self.app.clone()).build()?;
        event_loop.run_app(&mut self)
    }

    #[cfg(not(target_os = "android"))]
    fn start_loop(mut self) -> Result<(), EventLoopError> {
        let event_loop = EventLoop::new()?;
        event_loop.run_app(&mut self)
    }

    fn touch(&self, phase: TouchPhase) -> Event {
        Event::Input(Input::Touch{id: MOUSE_TOUCH_ID, phase, position: self.cursor})
    }
}

impl<E: EventHandler> ApplicationHandler for WindowManager<E> {
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached{..} = cause {
            if let Some(context) = &self.context { context.handle.request_redraw(); }
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        if !self.pause {
            if let Some(context) = &self.context {
                self.pause = true;
                self.event_handler.event(context, Event::Lifetime(Lifetime::Paused));
            }
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window = match event_loop.create_window(Window::default_attributes().with_title(self.title.clone())) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };
        let context = Context{handle: window};
        //Soft keyboard feeds the command field
        #[cfg(target_os = "android")]
        self.app.show_soft_input(true);
        self.event_handler.event(&context, Event::Lifetime(Lifetime::Resumed));
        context.handle.request_redraw();
        self.context = Some(context);
        self.pause = false;
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, i: WindowId, event: WindowEvent) {
        let Some(context) = self.context.clone() else {return};
        if i != context.handle.id() || (self.pause && !matches!(event, WindowEvent::Occluded(false) | WindowEvent::Focused(_))) {
            return;
        }
        let event = match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                event_loop.exit();
                Event::Lifetime(Lifetime::Close)
            },
            WindowEvent::RedrawRequested => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now()+TICK));
                Event::Lifetime(Lifetime::Draw)
            },
            WindowEvent::Occluded(occluded) => {
                if occluded {
                    self.pause = true;
                    Event::Lifetime(Lifetime::Paused)
                } else {
                    self.pause = false;
                    //Only on IOS is this called and it is prior to an actual Resume event
                    Event::Lifetime(Lifetime::Resumed)
                }
            },
            WindowEvent::Focused(focused) => Event::Input(Input::Focused(focused)),
            WindowEvent::KeyboardInput{event, ..} => {
                if event.state != ElementState::Pressed {return;}
                Event::Input(Input::Key{key: event.logical_key, text: event.text})
            },
            WindowEvent::Touch(touch) => Event::Input(Input::Touch{
                id: touch.id,
                phase: touch.phase,
                position: touch.location.into(),
            }),
            WindowEvent::CursorMoved{position, ..} => {
                self.cursor = position.into();
                if !self.mouse_down {return;}
                self.touch(TouchPhase::Moved)
            },
            WindowEvent::CursorLeft{..} => {
                if !self.mouse_down {return;}
                self.mouse_down = false;
                self.touch(TouchPhase::Cancelled)
            },
            WindowEvent::MouseInput{state, button: MouseButton::Left, ..} => {
                self.mouse_down = state == ElementState::Pressed;
                self.touch(if self.mouse_down {TouchPhase::Started} else {TouchPhase::Ended})
            },
            _ => {return;}
        };
        self.event_handler.event(&context, event);
    }
}
