use std::sync::mpsc::{Receiver, Sender};
use std::time::{Duration, Instant};

use smithay_client_toolkit::{
    compositor::{CompositorHandler, CompositorState},
    delegate_compositor, delegate_keyboard, delegate_layer, delegate_output, delegate_pointer,
    delegate_registry, delegate_seat,
    output::{OutputHandler, OutputState},
    registry::{ProvidesRegistryState, RegistryState},
    registry_handlers,
    seat::{
        keyboard::{KeyEvent, KeyboardHandler, Keysym, Modifiers},
        pointer::{PointerEvent, PointerEventKind, PointerHandler},
        Capability, SeatHandler, SeatState,
    },
    shell::{
        wlr_layer::{
            Anchor, KeyboardInteractivity, Layer, LayerShell, LayerShellHandler, LayerSurface,
            LayerSurfaceConfigure,
        },
        WaylandSurface,
    },
};
use wayland_client::{
    globals::GlobalList,
    protocol::{wl_callback, wl_display, wl_keyboard, wl_output, wl_pointer, wl_seat, wl_surface},
    Connection, Dispatch, EventQueue, Proxy, QueueHandle,
};

use crate::{
    common::TopwatchError,
    message::{InputEvent, KeyAction, UiMessage, WindowingMessage},
    Result,
};

pub const WINDOW_WIDTH: u32 = 170;
pub const WINDOW_HEIGHT: u32 = 65;

const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(450);

// Linux evdev button codes delivered by wl_pointer.
const BTN_LEFT: u32 = 0x110;
const BTN_RIGHT: u32 = 0x111;

/// Handle the UI thread uses to reach the windowing thread. Sending queues
/// the message and then issues a `wl_display.sync` so the blocking dispatch
/// loop wakes up and drains the channel.
pub struct WindowLink {
    sender: Sender<UiMessage>,
    display: wl_display::WlDisplay,
    qh: QueueHandle<AppData>,
}

impl WindowLink {
    pub fn new(
        sender: Sender<UiMessage>,
        display: wl_display::WlDisplay,
        qh: QueueHandle<AppData>,
    ) -> Self {
        Self {
            sender,
            display,
            qh,
        }
    }

    pub fn send(&self, message: UiMessage) {
        if self.sender.send(message).is_ok() {
            self.display.sync(&self.qh, WakeToken);
        }
    }
}

pub(crate) struct WakeToken;

/// State of the windowing side: the layer surface plus everything needed to
/// reduce seat input to the semantic event vocabulary.
pub struct AppData {
    running: bool,
    configured: bool,
    width: u32,
    height: u32,

    registry_state: RegistryState,
    seat_state: SeatState,
    output_state: OutputState,
    compositor: CompositorState,
    layer_shell: LayerShell,
    layer: Option<LayerSurface>,

    keyboard: Option<wl_keyboard::WlKeyboard>,
    pointer: Option<wl_pointer::WlPointer>,
    ctrl_held: bool,
    last_left_press: Option<Instant>,

    ui_sender: Sender<WindowingMessage>,
}

/// Dispatch wayland events on the calling thread until either side asks to
/// quit. With `start_hidden` the layer surface is only created once the tray
/// requests it.
pub fn run(
    conn: &Connection,
    globals: &GlobalList,
    event_queue: &mut EventQueue<AppData>,
    ui_sender: Sender<WindowingMessage>,
    receiver: Receiver<UiMessage>,
    start_hidden: bool,
) -> Result<()> {
    let qh = event_queue.handle();

    let compositor = CompositorState::bind(globals, &qh)
        .map_err(|_| TopwatchError::MissingGlobal("wl_compositor"))?;
    let layer_shell = LayerShell::bind(globals, &qh)
        .map_err(|_| TopwatchError::MissingGlobal("zwlr_layer_shell_v1"))?;

    let mut state = AppData {
        running: true,
        configured: false,
        width: WINDOW_WIDTH,
        height: WINDOW_HEIGHT,
        registry_state: RegistryState::new(globals),
        seat_state: SeatState::new(globals, &qh),
        output_state: OutputState::new(globals, &qh),
        compositor,
        layer_shell,
        layer: None,
        keyboard: None,
        pointer: None,
        ctrl_held: false,
        last_left_press: None,
        ui_sender,
    };

    if !start_hidden {
        state.show_window(&qh);
    }

    while state.running {
        event_queue.blocking_dispatch(&mut state)?;
        while let Ok(message) = receiver.try_recv() {
            state.handle_ui_message(message, &qh);
        }
    }

    Ok(())
}

impl AppData {
    /// Create and commit the layer surface in the bottom-right work-area
    /// corner. The first configure event hands it over to the UI thread.
    fn show_window(&mut self, qh: &QueueHandle<Self>) {
        if self.layer.is_some() {
            return;
        }
        log::debug!("creating layer surface");
        let surface = self.compositor.create_surface(qh);
        let layer =
            self.layer_shell
                .create_layer_surface(qh, surface, Layer::Top, Some("topwatch"), None);
        layer.set_anchor(Anchor::BOTTOM | Anchor::RIGHT);
        layer.set_size(WINDOW_WIDTH, WINDOW_HEIGHT);
        layer.set_margin(0, 1, 1, 0);
        layer.set_keyboard_interactivity(KeyboardInteractivity::OnDemand);
        layer.commit();
        self.layer = Some(layer);
    }

    fn handle_ui_message(&mut self, message: UiMessage, qh: &QueueHandle<Self>) {
        match message {
            UiMessage::AckResize { serial } => {
                let _ = self
                    .ui_sender
                    .send(WindowingMessage::SurfaceResizeAcked { serial });
            }
            UiMessage::SetTopmost(topmost) => {
                if let Some(layer) = &self.layer {
                    let level = if topmost { Layer::Overlay } else { Layer::Top };
                    log::debug!("moving surface to layer {level:?}");
                    layer.set_layer(level);
                    layer.commit();
                }
            }
            UiMessage::ShowWindow => self.show_window(qh),
            UiMessage::Quit => self.running = false,
        }
    }

    fn forward_input(&self, event: InputEvent) {
        let _ = self.ui_sender.send(WindowingMessage::Input(event));
    }
}

impl LayerShellHandler for AppData {
    fn closed(&mut self, _: &Connection, _: &QueueHandle<Self>, _: &LayerSurface) {
        log::info!("layer surface closed by the compositor");
        self.running = false;
        let _ = self.ui_sender.send(WindowingMessage::Quit);
    }

    fn configure(
        &mut self,
        conn: &Connection,
        _: &QueueHandle<Self>,
        _: &LayerSurface,
        configure: LayerSurfaceConfigure,
        serial: u32,
    ) {
        let (mut width, mut height) = configure.new_size;
        if width == 0 || height == 0 {
            width = WINDOW_WIDTH;
            height = WINDOW_HEIGHT;
        }
        self.width = width;
        self.height = height;

        if !self.configured {
            self.configured = true;
            let Some(layer) = self.layer.as_ref() else {
                return;
            };
            let message = WindowingMessage::SurfaceReady {
                display_id: conn.display().id(),
                surface_id: layer.wl_surface().id(),
                size: (width, height),
            };
            let _ = self.ui_sender.send(message);
        } else {
            let _ = self.ui_sender.send(WindowingMessage::SurfaceResize {
                size: (width, height),
                serial,
            });
        }
    }
}

impl CompositorHandler for AppData {
    fn scale_factor_changed(
        &mut self,
        _: &Connection,
        _: &QueueHandle<Self>,
        _: &wl_surface::WlSurface,
        _: i32,
    ) {
    }

    fn transform_changed(
        &mut self,
        _: &Connection,
        _: &QueueHandle<Self>,
        _: &wl_surface::WlSurface,
        _: wl_output::Transform,
    ) {
    }

    fn frame(&mut self, _: &Connection, _: &QueueHandle<Self>, _: &wl_surface::WlSurface, _: u32) {}

    fn surface_enter(
        &mut self,
        _: &Connection,
        _: &QueueHandle<Self>,
        _: &wl_surface::WlSurface,
        _: &wl_output::WlOutput,
    ) {
    }

    fn surface_leave(
        &mut self,
        _: &Connection,
        _: &QueueHandle<Self>,
        _: &wl_surface::WlSurface,
        _: &wl_output::WlOutput,
    ) {
    }
}

impl OutputHandler for AppData {
    fn output_state(&mut self) -> &mut OutputState {
        &mut self.output_state
    }

    fn new_output(&mut self, _: &Connection, _: &QueueHandle<Self>, _: wl_output::WlOutput) {}

    fn update_output(&mut self, _: &Connection, _: &QueueHandle<Self>, _: wl_output::WlOutput) {}

    fn output_destroyed(&mut self, _: &Connection, _: &QueueHandle<Self>, _: wl_output::WlOutput) {}
}

impl SeatHandler for AppData {
    fn seat_state(&mut self) -> &mut SeatState {
        &mut self.seat_state
    }

    fn new_seat(&mut self, _: &Connection, _: &QueueHandle<Self>, _: wl_seat::WlSeat) {}

    fn new_capability(
        &mut self,
        _conn: &Connection,
        qh: &QueueHandle<Self>,
        seat: wl_seat::WlSeat,
        capability: Capability,
    ) {
        if capability == Capability::Keyboard && self.keyboard.is_none() {
            match self.seat_state.get_keyboard(qh, &seat, None) {
                Ok(keyboard) => self.keyboard = Some(keyboard),
                Err(e) => log::warn!("failed to claim the keyboard: {e}"),
            }
        }

        if capability == Capability::Pointer && self.pointer.is_none() {
            match self.seat_state.get_pointer(qh, &seat) {
                Ok(pointer) => self.pointer = Some(pointer),
                Err(e) => log::warn!("failed to claim the pointer: {e}"),
            }
        }
    }

    fn remove_capability(
        &mut self,
        _conn: &Connection,
        _: &QueueHandle<Self>,
        _: wl_seat::WlSeat,
        capability: Capability,
    ) {
        if capability == Capability::Keyboard {
            if let Some(keyboard) = self.keyboard.take() {
                keyboard.release();
            }
        }

        if capability == Capability::Pointer {
            if let Some(pointer) = self.pointer.take() {
                pointer.release();
            }
        }
    }

    fn remove_seat(&mut self, _: &Connection, _: &QueueHandle<Self>, _: wl_seat::WlSeat) {}
}

impl KeyboardHandler for AppData {
    fn enter(
        &mut self,
        _: &Connection,
        _: &QueueHandle<Self>,
        _: &wl_keyboard::WlKeyboard,
        _: &wl_surface::WlSurface,
        _: u32,
        _: &[u32],
        _: &[Keysym],
    ) {
    }

    fn leave(
        &mut self,
        _: &Connection,
        _: &QueueHandle<Self>,
        _: &wl_keyboard::WlKeyboard,
        _: &wl_surface::WlSurface,
        _: u32,
    ) {
    }

    fn press_key(
        &mut self,
        _: &Connection,
        _: &QueueHandle<Self>,
        _: &wl_keyboard::WlKeyboard,
        _: u32,
        _: KeyEvent,
    ) {
    }

    // The original reacted on key-up, so the bindings live here.
    fn release_key(
        &mut self,
        _: &Connection,
        _: &QueueHandle<Self>,
        _: &wl_keyboard::WlKeyboard,
        _: u32,
        event: KeyEvent,
    ) {
        let action = match event.keysym {
            Keysym::Escape => Some(KeyAction::Close),
            Keysym::F1 => Some(KeyAction::Help),
            Keysym::F2 => Some(KeyAction::ToggleTopmost),
            Keysym::F3 => Some(KeyAction::ToggleStopwatch),
            _ => None,
        };
        if let Some(action) = action {
            self.forward_input(InputEvent::Key(action));
        }
    }

    fn update_modifiers(
        &mut self,
        _: &Connection,
        _: &QueueHandle<Self>,
        _: &wl_keyboard::WlKeyboard,
        _: u32,
        modifiers: Modifiers,
        _: u32,
    ) {
        self.ctrl_held = modifiers.ctrl;
    }
}

impl PointerHandler for AppData {
    fn pointer_frame(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _pointer: &wl_pointer::WlPointer,
        events: &[PointerEvent],
    ) {
        for event in events {
            let PointerEventKind::Press { button, .. } = event.kind else {
                continue;
            };
            match button {
                BTN_LEFT => {
                    let now = Instant::now();
                    let double = self
                        .last_left_press
                        .is_some_and(|t| now.duration_since(t) <= DOUBLE_CLICK_WINDOW);
                    if double {
                        self.last_left_press = None;
                        self.forward_input(InputEvent::LeftDoubleClick);
                    } else {
                        self.last_left_press = Some(now);
                        self.forward_input(InputEvent::LeftClick {
                            ctrl: self.ctrl_held,
                        });
                    }
                }
                BTN_RIGHT => self.forward_input(InputEvent::RightClick),
                _ => {}
            }
        }
    }
}

// Sync callbacks exist only to wake the dispatch loop after a channel send.
impl Dispatch<wl_callback::WlCallback, WakeToken> for AppData {
    fn event(
        _: &mut Self,
        _: &wl_callback::WlCallback,
        _: wl_callback::Event,
        _: &WakeToken,
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
    }
}

delegate_compositor!(AppData);
delegate_output!(AppData);
delegate_seat!(AppData);
delegate_keyboard!(AppData);
delegate_pointer!(AppData);
delegate_layer!(AppData);
delegate_registry!(AppData);

impl ProvidesRegistryState for AppData {
    fn registry(&mut self) -> &mut RegistryState {
        &mut self.registry_state
    }
    registry_handlers![OutputState, SeatState];
}
