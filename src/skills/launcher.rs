use super::AppLauncher;
use std::process::Command;
use tracing::warn;

/// Launches websites and applications on the host system.
pub struct SystemLauncher;

/// Application names recognized on Windows.
const WINDOWS_APPS: &[(&str, &str)] = &[
    ("notepad", "notepad.exe"),
    ("calculator", "calc.exe"),
    ("paint", "mspaint.exe"),
    ("task manager", "taskmgr.exe"),
];

/// Application names recognized on macOS, launched with `open -a`.
const MACOS_APPS: &[(&str, &str)] = &[
    ("notes", "Notes"),
    ("calculator", "Calculator"),
    ("textedit", "TextEdit"),
];

impl SystemLauncher {
    fn spawn_app(name: &str, mut command: Command) -> String {
        match command.spawn() {
            Ok(_) => format!("Opening {}.", name),
            Err(e) => {
                warn!("Failed to launch '{}': {}", name, e);
                format!("Couldn't find the application '{}' on your system.", name)
            }
        }
    }
}

impl AppLauncher for SystemLauncher {
    fn open_website(&self, site: &str, url: &str) -> String {
        match webbrowser::open(url) {
            Ok(_) => format!("Opening {}.", site),
            Err(e) => {
                warn!("Failed to open browser for {}: {}", url, e);
                format!("I couldn't open {} right now.", site)
            }
        }
    }

    fn open_application(&self, name: &str) -> String {
        let name = name.trim();

        if cfg!(target_os = "windows") {
            match WINDOWS_APPS.iter().find(|(app, _)| *app == name) {
                Some((_, binary)) => Self::spawn_app(name, Command::new(binary)),
                None => format!("I don't know how to open '{}' on Windows.", name),
            }
        } else if cfg!(target_os = "macos") {
            match MACOS_APPS.iter().find(|(app, _)| *app == name) {
                Some((_, app)) => {
                    let mut command = Command::new("open");
                    command.args(["-a", app]);
                    Self::spawn_app(name, command)
                }
                None => format!("I don't know how to open '{}' on macOS.", name),
            }
        } else {
            // Elsewhere the name is tried as a command directly.
            Self::spawn_app(name, Command::new(name))
        }
    }
}
