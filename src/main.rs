use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

use wayland_client::{globals::registry_queue_init, Connection};

use crate::args::Command;
use crate::common::TopwatchError;
use crate::message::{UiMessage, WindowingMessage};
use crate::windowing_thread::{AppData, WindowLink};

mod args;
mod autostart;
mod clock;
mod common;
mod format;
mod message;
mod stopwatch;
mod style;
mod tray;
mod ui;
mod windowing_thread;

pub(crate) type Result<T> = std::result::Result<T, TopwatchError>;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let command = match args::parse_args() {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}\n\n{}", args::USAGE);
            return ExitCode::FAILURE;
        }
    };

    let result = match command {
        Command::Help => {
            println!("{}", args::USAGE);
            Ok(())
        }
        Command::Autostart(mode) => autostart::register(mode),
        Command::Run { hidden } => run(hidden),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Normal start: the wayland dispatch loop runs on this thread, everything
/// slint runs on the UI thread, the tray icon on its own gtk thread.
fn run(hidden: bool) -> Result<()> {
    let conn = Connection::connect_to_env()?;
    let (globals, mut event_queue) = registry_queue_init::<AppData>(&conn)?;
    let qh = event_queue.handle();

    let (ui_sender, ui_receiver) = mpsc::channel::<WindowingMessage>();
    let (command_sender, command_receiver) = mpsc::channel::<UiMessage>();
    let link = WindowLink::new(command_sender, conn.display(), qh);

    tray::spawn();

    let ui_handle = thread::Builder::new()
        .name("ui".to_owned())
        .spawn(move || {
            let result = ui::ui_thread(&link, ui_receiver);
            if result.is_err() {
                // never leave the dispatch loop blocked on a dead peer
                link.send(UiMessage::Quit);
            }
            result
        })
        .map_err(|e| TopwatchError::Generic(format!("failed to spawn the UI thread: {e}")))?;

    let result = windowing_thread::run(
        &conn,
        &globals,
        &mut event_queue,
        ui_sender.clone(),
        command_receiver,
        hidden,
    );

    // unblock the UI thread if the windowing loop ended first
    let _ = ui_sender.send(WindowingMessage::Quit);
    let ui_result = ui_handle
        .join()
        .map_err(|_| TopwatchError::Generic("the UI thread panicked".to_owned()))?;

    result.and(ui_result)
}
