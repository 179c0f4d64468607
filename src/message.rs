use wayland_client::backend::ObjectId;

/// Semantic input vocabulary the windowing thread reduces raw pointer and
/// keyboard events to. Tray interactions map onto the same set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    LeftClick { ctrl: bool },
    LeftDoubleClick,
    RightClick,
    Key(KeyAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Close,
    Help,
    ToggleTopmost,
    ToggleStopwatch,
}

/// Windowing thread -> UI thread.
#[derive(Debug)]
pub enum WindowingMessage {
    SurfaceReady {
        display_id: ObjectId,
        surface_id: ObjectId,
        size: (u32, u32),
    },
    SurfaceResize {
        size: (u32, u32),
        serial: u32,
    },
    SurfaceResizeAcked {
        serial: u32,
    },
    Input(InputEvent),
    Quit,
}

/// UI thread -> windowing thread.
#[derive(Debug)]
pub enum UiMessage {
    AckResize { serial: u32 },
    SetTopmost(bool),
    ShowWindow,
    Quit,
}
