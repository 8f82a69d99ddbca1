//! Rolling File Logger
//!
//! Installs a global `tracing` subscriber that appends to
//! `<dir>/<app_name>.log`, shifting older output to `.1`, `.2`, ... once the
//! active file grows past a size limit. Only a bounded number of files is
//! kept. Warnings and errors are mirrored to stderr. `log` records are
//! bridged, so libraries logging through the `log` facade end up here too.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing::Level;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::writer::{MakeWriter, MakeWriterExt};

/// Rotate once the active file would exceed this many bytes
pub const DEFAULT_MAX_BYTES: u64 = 1024 * 1024;

/// Active file plus rotated ones
pub const DEFAULT_MAX_FILES: usize = 5;

static INSTALLED: OnceLock<PathBuf> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("log file error: {0}")]
    Io(#[from] io::Error),
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("logger not initialized")]
    NotInitialized,
}

/// Size-bounded log file with a fixed ring of rotated siblings
pub struct RollingFile {
    dir: PathBuf,
    app_name: String,
    max_bytes: u64,
    max_files: usize,
    file: File,
    written: u64,
}

impl RollingFile {
    pub fn open(dir: impl AsRef<Path>, app_name: &str, max_bytes: u64, max_files: usize) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{}.log", app_name));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            dir,
            app_name: app_name.to_string(),
            max_bytes: max_bytes.max(1),
            max_files: max_files.max(1),
            file,
            written,
        })
    }

    pub fn active_path(&self) -> PathBuf {
        self.path_for(0)
    }

    fn path_for(&self, index: usize) -> PathBuf {
        if index == 0 {
            self.dir.join(format!("{}.log", self.app_name))
        } else {
            self.dir.join(format!("{}.log.{}", self.app_name, index))
        }
    }

    /// `.log` becomes `.log.1`, `.log.1` becomes `.log.2`, and so on; the
    /// oldest file past the ring is dropped
    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        let last = self.max_files - 1;
        if last == 0 {
            self.file = File::create(self.path_for(0))?;
            self.written = 0;
            return Ok(());
        }
        let oldest = self.path_for(last);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (0..last).rev() {
            let from = self.path_for(index);
            if from.exists() {
                fs::rename(&from, self.path_for(index + 1))?;
            }
        }
        self.file = OpenOptions::new().create(true).append(true).open(self.path_for(0))?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

#[derive(Clone)]
struct SharedFile(Arc<Mutex<RollingFile>>);

impl Write for SharedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).flush()
    }
}

impl<'a> MakeWriter<'a> for SharedFile {
    type Writer = SharedFile;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Install the global logger with the default size limits
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), LoggerError> {
    init_with_limits(log_dir, app_name, DEFAULT_MAX_BYTES, DEFAULT_MAX_FILES)
}

pub fn init_with_limits(
    log_dir: impl AsRef<Path>,
    app_name: &str,
    max_bytes: u64,
    max_files: usize,
) -> Result<(), LoggerError> {
    if INSTALLED.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }
    let file = RollingFile::open(log_dir, app_name, max_bytes, max_files)?;
    let path = file.active_path();
    let shared = SharedFile(Arc::new(Mutex::new(file)));

    tracing_subscriber::fmt()
        .with_writer(shared.and(io::stderr.with_max_level(Level::WARN)))
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .with_timer(LocalTime)
        .with_target(true)
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    INSTALLED
        .set(path.clone())
        .map_err(|_| LoggerError::AlreadyInitialized)?;
    tracing::info!("Logging to {}", path.display());
    Ok(())
}

/// Active log file, once initialized
pub fn log_path() -> Option<&'static Path> {
    INSTALLED.get().map(PathBuf::as_path)
}

fn ensure_initialized() -> Result<(), LoggerError> {
    INSTALLED.get().map(|_| ()).ok_or(LoggerError::NotInitialized)
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::info!("{}", message);
    Ok(())
}

pub fn warn(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::warn!("{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::error!("{}", message);
    Ok(())
}
