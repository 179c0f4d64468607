use crate::autostart::AutostartMode;

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Normal start; `hidden` keeps the window unmapped until the tray asks
    /// for it.
    Run { hidden: bool },
    Help,
    Autostart(AutostartMode),
}

pub const USAGE: &str = "Usage: topwatch [ARGUMENT]

Arguments:
help                    show this help and exit
hidden                  start with the window not shown (tray icon only)
autostart=normal        register topwatch to launch at login
autostart=hidden        register topwatch to launch at login, hidden
autostart=disabled      remove the launch-at-login registration

Keys and mouse:
ESC / left doubleclick  close
F1                      toggle the help overlay
F2 / ctrl + left click  toggle always-on-top
F3 / right click        toggle the stopwatch";

pub fn parse_args() -> Result<Command, lexopt::Error> {
    parse_from(std::env::args_os().skip(1))
}

fn parse_from<I>(args: I) -> Result<Command, lexopt::Error>
where
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString>,
{
    use lexopt::prelude::*;

    let mut hidden = false;
    let mut parser = lexopt::Parser::from_args(args);
    while let Some(arg) = parser.next()? {
        match arg {
            // "-help" arrives as Short('h') followed by the rest, so bail
            // out before the remainder is inspected.
            Short('h') | Short('?') | Long("help") => return Ok(Command::Help),
            Value(value) => match value.string()?.as_str() {
                "help" | "/help" | "?" | "/?" => return Ok(Command::Help),
                "hidden" => hidden = true,
                "autostart=normal" => return Ok(Command::Autostart(AutostartMode::Normal)),
                "autostart=hidden" => return Ok(Command::Autostart(AutostartMode::Hidden)),
                "autostart=disabled" => return Ok(Command::Autostart(AutostartMode::Disabled)),
                other => {
                    return Err(lexopt::Error::Custom(
                        format!("unrecognized argument '{other}'").into(),
                    ))
                }
            },
            _ => return Err(arg.unexpected()),
        }
    }

    Ok(Command::Run { hidden })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        parse_from(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn no_arguments_is_a_normal_start() {
        assert_eq!(parse(&[]).unwrap(), Command::Run { hidden: false });
    }

    #[test]
    fn hidden_start() {
        assert_eq!(parse(&["hidden"]).unwrap(), Command::Run { hidden: true });
    }

    #[test]
    fn all_help_spellings() {
        for arg in ["help", "-help", "/help", "--help", "?", "-?", "/?"] {
            assert_eq!(parse(&[arg]).unwrap(), Command::Help, "spelling {arg}");
        }
    }

    #[test]
    fn autostart_modes() {
        assert_eq!(
            parse(&["autostart=normal"]).unwrap(),
            Command::Autostart(AutostartMode::Normal)
        );
        assert_eq!(
            parse(&["autostart=hidden"]).unwrap(),
            Command::Autostart(AutostartMode::Hidden)
        );
        assert_eq!(
            parse(&["autostart=disabled"]).unwrap(),
            Command::Autostart(AutostartMode::Disabled)
        );
    }

    #[test]
    fn unknown_arguments_are_rejected() {
        assert!(parse(&["autostart=sometimes"]).is_err());
        assert!(parse(&["frobnicate"]).is_err());
    }
}
