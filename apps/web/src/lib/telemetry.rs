//! Logging setup. Events go through `tracing`; in the browser a `fmt` layer
//! writes each formatted line to the developer console. Callers must never
//! put tokens, passwords, or one-time codes in events.

use std::io;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{Registry, fmt, layer::SubscriberExt};

/// Console severity chosen from the formatted line's level tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ConsoleLevel {
    Error,
    Warn,
    Info,
    Debug,
}

fn console_level(line: &str) -> ConsoleLevel {
    let head = line.trim_start();
    if head.starts_with("ERROR") {
        ConsoleLevel::Error
    } else if head.starts_with("WARN") {
        ConsoleLevel::Warn
    } else if head.starts_with("DEBUG") || head.starts_with("TRACE") {
        ConsoleLevel::Debug
    } else {
        ConsoleLevel::Info
    }
}

/// Buffers one formatted event and forwards it to the console on drop.
#[derive(Default)]
pub struct ConsoleWriter {
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let line = String::from_utf8_lossy(&self.buffer).trim_end().to_string();
        self.buffer.clear();
        if !line.is_empty() {
            emit(console_level(&line), &line);
        }
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(level: ConsoleLevel, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        ConsoleLevel::Error => web_sys::console::error_1(&value),
        ConsoleLevel::Warn => web_sys::console::warn_1(&value),
        ConsoleLevel::Info => web_sys::console::info_1(&value),
        ConsoleLevel::Debug => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(level: ConsoleLevel, line: &str) {
    match level {
        ConsoleLevel::Error | ConsoleLevel::Warn => eprintln!("{line}"),
        ConsoleLevel::Info | ConsoleLevel::Debug => println!("{line}"),
    }
}

/// Installs the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(level: LevelFilter) {
    let fmt_layer = fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_writer(ConsoleWriter::default);

    let subscriber = Registry::default().with(fmt_layer).with(level);
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
