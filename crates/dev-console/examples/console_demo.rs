//! Renders the dev console against a live capture.
//!
//! Run with: `cargo run -p platepilot-dev-console --example console_demo`

use serde_json::json;

use platepilot_dev_console::{ConsoleFilter, DevConsole};
use platepilot_dev_log::{Console, ConsoleValue, ErrorInfo, LogCapture, LogLevel, console_args};

fn main() {
    let console = Console::global();
    let capture = LogCapture::new(console.clone());
    capture.install();

    let mut view = DevConsole::new();
    view.mount(&capture);
    view.open();

    console.info(&console_args!["starting demo session"]);
    console.log(&console_args!["request payload:", json!({"days": 7, "servings": 2})]);
    console.warn(&console_args!["macro goals look low"]);
    console.error(&console_args![
        "generation failed:",
        ErrorInfo::with_trace("upstream timeout", "caused by: connection reset"),
    ]);
    capture.handle_rejection(ConsoleValue::Text("background refresh died".into()));

    if let Some(entry) = view.entries().iter().find(|e| e.details.is_some()) {
        view.toggle_expanded(entry.id);
    }

    println!("\n----- all levels -----");
    print!("{}", view.render());

    view.set_filter(ConsoleFilter::Level(LogLevel::Error));
    println!("\n----- errors only -----");
    print!("{}", view.render());

    view.unmount();
    capture.uninstall();
}
