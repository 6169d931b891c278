//! File logger for terminal front ends, which cannot log to stdout.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use log::{Level, Metadata, Record};

use crate::error::Result;

struct FileLogger {
    file: Mutex<File>,
    level: Level,
}

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut file) = self.file.lock() {
                let _ = writeln!(
                    file,
                    "[{}] {}: {}",
                    record.level(),
                    record.target(),
                    record.args()
                );
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Appends `debug!` and above to the file at `path`.
///
/// Installing a second logger is a no-op; the first one stays active.
pub fn init_logger(path: impl AsRef<Path>) -> Result<()> {
    init_logger_with_level(path, Level::Debug)
}

pub fn init_logger_with_level(path: impl AsRef<Path>, level: Level) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let logger = FileLogger {
        file: Mutex::new(file),
        level,
    };
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level.to_level_filter());
    }
    Ok(())
}
