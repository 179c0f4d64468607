use auto_launch::AutoLaunchBuilder;

use crate::{common::TopwatchError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutostartMode {
    /// Launch at login with the window shown.
    Normal,
    /// Launch at login with only the tray icon.
    Hidden,
    /// Remove the registration.
    Disabled,
}

/// Register or unregister launch-at-login for the current executable.
pub fn register(mode: AutostartMode) -> Result<()> {
    let exe = std::env::current_exe()
        .map_err(|e| TopwatchError::Autostart(format!("cannot resolve own path: {e}")))?;

    let mut builder = AutoLaunchBuilder::new();
    builder
        .set_app_name("topwatch")
        .set_app_path(&exe.to_string_lossy());
    if mode == AutostartMode::Hidden {
        builder.set_args(&["hidden"]);
    }
    let auto = builder
        .build()
        .map_err(|e| TopwatchError::Autostart(e.to_string()))?;

    match mode {
        AutostartMode::Disabled => auto.disable(),
        AutostartMode::Normal | AutostartMode::Hidden => auto.enable(),
    }
    .map_err(|e| TopwatchError::Autostart(e.to_string()))?;

    log::info!("autostart set to {mode:?}");
    Ok(())
}
