use std::{
    rc::Rc,
    sync::mpsc::{Receiver, RecvTimeoutError},
    time::Duration,
};

use slint::{
    platform::{femtovg_renderer::FemtoVGRenderer, WindowEvent},
    LogicalSize, PhysicalSize,
};
use slint_interpreter::{ComponentHandle, ComponentInstance, SharedString};
use tray_icon::{menu::MenuEvent, MouseButton, MouseButtonState, TrayIconEvent};

use crate::{
    clock::{self, TickSource},
    common::TopwatchError,
    format,
    message::{InputEvent, KeyAction, UiMessage, WindowingMessage},
    stopwatch::Stopwatch,
    style, tray,
    ui::{egl::OpenGLContext, platform::TopwatchSlintPlatform, window_adapter::WidgetWindow},
    windowing_thread::WindowLink,
    Result,
};

mod egl;
mod platform;
pub mod slint_types;
mod window_adapter;

#[derive(PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// The single record behind the widget: stopwatch, tick source and the two
/// display flags. Owned by the UI thread, mutated only through input events.
struct WidgetState {
    stopwatch: Stopwatch,
    ticks: TickSource,
    topmost: bool,
    show_help: bool,
}

impl WidgetState {
    fn new() -> Self {
        Self {
            stopwatch: Stopwatch::new(),
            ticks: TickSource::new(),
            topmost: false,
            show_help: false,
        }
    }

    fn handle_input(&mut self, event: InputEvent, link: &WindowLink) -> Flow {
        match event {
            InputEvent::LeftClick { ctrl: true } | InputEvent::Key(KeyAction::ToggleTopmost) => {
                self.topmost = !self.topmost;
                link.send(UiMessage::SetTopmost(self.topmost));
            }
            InputEvent::LeftClick { ctrl: false } => {}
            InputEvent::LeftDoubleClick | InputEvent::Key(KeyAction::Close) => return Flow::Quit,
            InputEvent::RightClick | InputEvent::Key(KeyAction::ToggleStopwatch) => {
                let phase = self.stopwatch.toggle(self.ticks.now_ms());
                log::info!("stopwatch is now {phase:?}");
            }
            InputEvent::Key(KeyAction::Help) => self.show_help = !self.show_help,
        }
        Flow::Continue
    }

    /// Tray interactions reuse the window input vocabulary: left click shows
    /// the window, right click drives the stopwatch, a left double click
    /// closes. Menu entries mirror the key bindings.
    fn drain_tray(&mut self, link: &WindowLink) -> Flow {
        while let Ok(event) = MenuEvent::receiver().try_recv() {
            let flow = match event.id().0.as_str() {
                tray::MENU_SHOW => {
                    link.send(UiMessage::ShowWindow);
                    Flow::Continue
                }
                tray::MENU_STOPWATCH => self.handle_input(InputEvent::RightClick, link),
                tray::MENU_TOPMOST => {
                    self.handle_input(InputEvent::Key(KeyAction::ToggleTopmost), link)
                }
                tray::MENU_QUIT => Flow::Quit,
                _ => Flow::Continue,
            };
            if flow == Flow::Quit {
                return Flow::Quit;
            }
        }
        while let Ok(event) = TrayIconEvent::receiver().try_recv() {
            let flow = match event {
                TrayIconEvent::Click {
                    button: MouseButton::Left,
                    button_state: MouseButtonState::Up,
                    ..
                } => {
                    link.send(UiMessage::ShowWindow);
                    Flow::Continue
                }
                TrayIconEvent::Click {
                    button: MouseButton::Right,
                    button_state: MouseButtonState::Up,
                    ..
                } => self.handle_input(InputEvent::RightClick, link),
                TrayIconEvent::DoubleClick {
                    button: MouseButton::Left,
                    ..
                } => Flow::Quit,
                _ => Flow::Continue,
            };
            if flow == Flow::Quit {
                return Flow::Quit;
            }
        }
        Flow::Continue
    }
}

pub fn ui_thread(link: &WindowLink, receiver: Receiver<WindowingMessage>) -> Result<()> {
    let style = style::load_style_or_fallback()?;
    let mut widget = WidgetState::new();

    let Some(slint_window) = wait_for_surface(&receiver, link, &mut widget)? else {
        // quit was requested before the surface ever appeared
        return Ok(());
    };

    let ui = style
        .create()
        .map_err(|e| TopwatchError::Generic(e.to_string()))?;
    ui.show()
        .map_err(|e| TopwatchError::Generic(e.to_string()))?;

    let mut last_serial = -1i64;
    let mut last_acked_serial = -1i64;
    let mut clock_text = String::new();
    let mut stopwatch_text = String::new();

    loop {
        slint::platform::update_timers_and_animations();

        while let Ok(message) = receiver.try_recv() {
            match message {
                WindowingMessage::Input(event) => {
                    if widget.handle_input(event, link) == Flow::Quit {
                        log::info!("quitting UI thread...");
                        link.send(UiMessage::Quit);
                        return Ok(());
                    }
                }
                WindowingMessage::SurfaceResize { size, serial } => {
                    slint_window.dispatch_event(WindowEvent::Resized {
                        size: LogicalSize::new(size.0 as f32, size.1 as f32),
                    });
                    link.send(UiMessage::AckResize { serial });
                    last_serial = serial as i64;
                }
                WindowingMessage::SurfaceResizeAcked { serial } => {
                    last_acked_serial = serial as i64;
                }
                WindowingMessage::Quit => {
                    log::info!("quitting UI thread...");
                    return Ok(());
                }
                WindowingMessage::SurfaceReady { .. } => {
                    return Err(TopwatchError::Generic(
                        "surface already configured".to_owned(),
                    ));
                }
            }
        }

        if widget.drain_tray(link) == Flow::Quit {
            link.send(UiMessage::Quit);
            return Ok(());
        }

        widget.stopwatch.refresh(widget.ticks.now_ms());

        // Text properties only change when a displayed digit does, so the
        // idle clock redraws once per wall-clock second.
        let (h, m, s) = clock::wall_hms();
        let new_clock = format::clock_line(h, m, s, widget.topmost);
        if new_clock != clock_text {
            clock_text = new_clock;
            set_string_property(&ui, "clock_text", &clock_text)?;
        }

        let running = widget.stopwatch.is_running();
        let new_stopwatch = format::stopwatch_line(&widget.stopwatch.elapsed(), running);
        if new_stopwatch != stopwatch_text {
            stopwatch_text = new_stopwatch;
            set_string_property(&ui, "stopwatch_text", &stopwatch_text)?;
        }

        // optional style properties; their absence was reported at load time
        let _ = ui.set_property("stopwatch_running", running.into());
        let _ = ui.set_property("show_help", widget.show_help.into());

        if last_serial == last_acked_serial {
            slint_window.draw_if_needed()?;
        }

        if !slint_window.has_active_animations() {
            let interval = widget.stopwatch.redraw_interval();
            let duration = slint::platform::duration_until_next_timer_update()
                .map_or(interval, |d| d.min(interval));
            std::thread::sleep(duration);
        }
    }
}

fn set_string_property(ui: &ComponentInstance, name: &str, value: &str) -> Result<()> {
    ui.set_property(name, SharedString::from(value).into())
        .map_err(|_| TopwatchError::property_fail(name))
}

/// Block until the windowing thread hands over a configured surface, then
/// stand up the renderer and the slint platform. Tray events are still
/// polled here so a hidden start can be shown or quit from the tray.
fn wait_for_surface(
    receiver: &Receiver<WindowingMessage>,
    link: &WindowLink,
    widget: &mut WidgetState,
) -> Result<Option<Rc<WidgetWindow>>> {
    loop {
        match receiver.recv_timeout(Duration::from_millis(100)) {
            Ok(WindowingMessage::SurfaceReady {
                display_id,
                surface_id,
                size,
            }) => {
                let context = OpenGLContext::new(display_id, surface_id, size)?;
                let renderer = FemtoVGRenderer::new(context)
                    .map_err(|e| TopwatchError::Generic(e.to_string()))?;
                let slint_window = WidgetWindow::new(renderer);
                slint_window.set_size(slint::WindowSize::Physical(PhysicalSize::new(
                    size.0, size.1,
                )));

                let platform = TopwatchSlintPlatform::new(slint_window.clone());
                slint::platform::set_platform(Box::new(platform))
                    .map_err(|_| TopwatchError::Generic("slint platform already set".to_owned()))?;

                return Ok(Some(slint_window));
            }
            Ok(WindowingMessage::Input(event)) => {
                if widget.handle_input(event, link) == Flow::Quit {
                    link.send(UiMessage::Quit);
                    return Ok(None);
                }
            }
            Ok(WindowingMessage::Quit) => return Err(TopwatchError::WindowingThreadQuit),
            Ok(_) => {}
            Err(RecvTimeoutError::Timeout) => {
                if widget.drain_tray(link) == Flow::Quit {
                    link.send(UiMessage::Quit);
                    return Ok(None);
                }
            }
            Err(RecvTimeoutError::Disconnected) => return Err(TopwatchError::WindowingThreadQuit),
        }
    }
}
