use tray_icon::{
    menu::{Menu, MenuItem, PredefinedMenuItem},
    Icon, TrayIconBuilder,
};

// Menu ids matched against MenuEvent in the UI loop.
pub const MENU_SHOW: &str = "show";
pub const MENU_STOPWATCH: &str = "stopwatch";
pub const MENU_TOPMOST: &str = "topmost";
pub const MENU_QUIT: &str = "quit";

/// Run the tray icon on its own thread. tray-icon requires the gtk main
/// loop on Linux, so the icon lives there for the whole process lifetime;
/// events are delivered through the crate's global channels.
pub fn spawn() {
    let result = std::thread::Builder::new()
        .name("tray".to_owned())
        .spawn(|| {
            if let Err(e) = run() {
                log::warn!("tray icon unavailable: {e}");
            }
        });
    if let Err(e) = result {
        log::warn!("could not spawn the tray thread: {e}");
    }
}

fn run() -> Result<(), String> {
    gtk::init().map_err(|e| e.to_string())?;

    let menu = Menu::new();
    menu.append_items(&[
        &MenuItem::with_id(MENU_SHOW, "Show clock", true, None),
        &MenuItem::with_id(MENU_STOPWATCH, "Stopwatch", true, None),
        &MenuItem::with_id(MENU_TOPMOST, "Always on top", true, None),
        &PredefinedMenuItem::separator(),
        &MenuItem::with_id(MENU_QUIT, "Quit", true, None),
    ])
    .map_err(|e| e.to_string())?;

    let _tray = TrayIconBuilder::new()
        .with_tooltip("topwatch")
        .with_menu(Box::new(menu))
        .with_icon(icon()?)
        .build()
        .map_err(|e| e.to_string())?;

    gtk::main();
    Ok(())
}

/// Procedurally drawn clock face: an outer ring, a center dot and a hand
/// pointing at twelve.
fn icon() -> Result<Icon, String> {
    const SIZE: u32 = 32;
    let mut rgba = vec![0u8; (SIZE * SIZE * 4) as usize];
    let center = SIZE as f32 / 2.0;
    let outer = center - 1.0;
    let inner = outer - 3.0;

    let mut put = |x: u32, y: u32| {
        let idx = ((y * SIZE + x) * 4) as usize;
        rgba[idx..idx + 4].copy_from_slice(&[230, 230, 230, 255]);
    };

    for y in 0..SIZE {
        for x in 0..SIZE {
            let dx = x as f32 + 0.5 - center;
            let dy = y as f32 + 0.5 - center;
            let dist = (dx * dx + dy * dy).sqrt();
            if (inner..=outer).contains(&dist) || dist <= 2.0 {
                put(x, y);
            }
        }
    }
    for y in 6..SIZE / 2 {
        put(SIZE / 2 - 1, y);
        put(SIZE / 2, y);
    }

    Icon::from_rgba(rgba, SIZE, SIZE).map_err(|e| e.to_string())
}
