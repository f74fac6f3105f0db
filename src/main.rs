use std::time::Duration;

use clap::Parser;
use ratatui::layout::Rect;
use viewport_wm::config::{Cli, DesktopConfig};
use viewport_wm::desktop::Desktop;
use viewport_wm::drivers::console::{ConsoleDriver, ConsoleTerminal};
use viewport_wm::error::DesktopError;
use viewport_wm::runner::run_desktop;
use viewport_wm::store::WindowSpec;
use viewport_wm::tracing_sub;

fn main() -> Result<(), DesktopError> {
    let cli = Cli::parse();
    let config = DesktopConfig::try_from(&cli)?;
    tracing_sub::init(config.log_level, config.log_file.as_deref())?;

    let mut console = ConsoleTerminal::enter()?;
    let mut driver = ConsoleDriver::new();
    let screen = console.terminal_mut().size()?;
    let mut desktop = Desktop::new(&config, Rect::new(0, 0, screen.width, screen.height));

    desktop.open(WindowSpec::new("About", "about").with_icon('?'));
    desktop.open(WindowSpec::new("Readme", "readme").with_size(480, 320));
    desktop.open(WindowSpec::new("Windows", "inspector").with_size(560, 320));
    desktop.open(WindowSpec::new("Solitaire", "solitaire").with_size(320, 240));
    tracing::info!(windows = desktop.store().len(), "desktop ready");

    let result = run_desktop(
        console.terminal_mut(),
        &mut driver,
        &mut desktop,
        Duration::from_millis(16),
    );
    console.exit()?;
    result
}
