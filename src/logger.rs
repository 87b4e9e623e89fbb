use std::fs::{create_dir_all, OpenOptions};
use std::io::{stderr, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

static LOG_FILE: OnceLock<Mutex<std::fs::File>> = OnceLock::new();

#[macro_export]
macro_rules! app_log {
    ($($arg:tt)*) => {{
        $crate::logger::log_line(format!($($arg)*));
    }};
}

/// Mirror log lines into `<log_dir>/run.log`. Failures leave stderr-only logging.
pub fn init_file_logger(log_dir: Option<&Path>) {
    let Some(log_dir) = log_dir else {
        return;
    };

    if create_dir_all(log_dir).is_err() {
        return;
    }

    let log_path = log_dir.join("run.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path);

    if let Ok(file) = file {
        let _ = LOG_FILE.set(Mutex::new(file));
        log_line(format!("[logger] file logger ready: {}", log_path.display()));
    }
}

pub fn log_line(message: String) {
    let _ = writeln!(stderr(), "{message}");

    if let Some(lock) = LOG_FILE.get() {
        if let Ok(mut file) = lock.lock() {
            let _ = writeln!(file, "{message}");
        }
    }
}
