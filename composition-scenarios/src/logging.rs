use anyhow::Result;
use log::LevelFilter;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Initialize logging at `level` (default info), optionally appending to
/// `log_file` as well as the terminal. Calling it again is a no-op.
pub fn init_logging(level: Option<&str>, log_file: Option<&Path>) -> Result<()> {
    let level = level.unwrap_or("info");
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level));
    builder.filter_level(parse_level(level));

    if let Some(path) = log_file {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(DualWriter::new(file))));
    }

    if builder.try_init().is_err() {
        log::debug!("Logger already initialized");
        return Ok(());
    }
    match log_file {
        Some(path) => log::info!(
            "Logging initialized. Logs will be written to both terminal and: {} (level: {})",
            path.display(),
            level
        ),
        None => log::info!(
            "Logging initialized. Logs will be written to terminal only (level: {})",
            level
        ),
    }
    Ok(())
}

/// Writes to both a file and stdout
struct DualWriter {
    file: std::fs::File,
}

impl DualWriter {
    fn new(file: std::fs::File) -> Self {
        Self { file }
    }
}

impl Write for DualWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write_all(buf)?;
        io::stdout().write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()?;
        io::stdout().flush()
    }
}
