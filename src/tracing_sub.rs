use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::{Level, Subscriber};

use crate::error::DesktopError;

pub struct DelegatingWriter {
    inner: DelegatingInner,
}

enum DelegatingInner {
    File(Arc<Mutex<File>>),
    Stderr(io::Stderr),
}

impl DelegatingWriter {
    fn with_file<T>(file: &Mutex<File>, f: impl FnOnce(&mut File) -> io::Result<T>) -> io::Result<T> {
        let mut guard = file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        f(&mut guard)
    }
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DelegatingInner::File(file) => Self::with_file(file, |f| f.write(buf)),
            DelegatingInner::Stderr(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DelegatingInner::File(file) => Self::with_file(file, |f| f.flush()),
            DelegatingInner::Stderr(s) => s.flush(),
        }
    }
}

/// Sends formatted events to a shared log file, or to stderr when none is
/// configured. The terminal owns stdout while the desktop runs.
#[derive(Clone, Debug, Default)]
pub struct SubscriberMakeWriter {
    file: Option<Arc<Mutex<File>>>,
}

impl SubscriberMakeWriter {
    pub fn stderr() -> Self {
        Self::default()
    }

    pub fn file(file: File) -> Self {
        Self {
            file: Some(Arc::new(Mutex::new(file))),
        }
    }

    pub fn is_stderr(&self) -> bool {
        self.file.is_none()
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        let inner = match &self.file {
            Some(file) => DelegatingInner::File(Arc::clone(file)),
            None => DelegatingInner::Stderr(io::stderr()),
        };
        DelegatingWriter { inner }
    }
}

pub(crate) fn build(level: Level, writer: SubscriberMakeWriter) -> impl Subscriber + Send + Sync {
    let ansi = writer.is_stderr();
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(writer)
        .with_target(false)
        .with_thread_names(false)
        .with_ansi(ansi)
        .finish()
}

/// Install the global subscriber. Later calls leave the first subscriber in
/// place.
pub fn init(level: Level, log_file: Option<&Path>) -> Result<(), DesktopError> {
    let writer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| DesktopError::LogFile {
                    path: path.to_path_buf(),
                    source,
                })?;
            SubscriberMakeWriter::file(file)
        }
        None => SubscriberMakeWriter::stderr(),
    };
    let _ = tracing::subscriber::set_global_default(build(level, writer));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_writer_receives_events_at_level() {
        let log = tempfile::NamedTempFile::new().unwrap();
        let file = log.reopen().unwrap();
        let subscriber = build(Level::DEBUG, SubscriberMakeWriter::file(file));
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(window_id = 7, "drag started");
            tracing::trace!("filtered out");
        });
        let text = std::fs::read_to_string(log.path()).unwrap();
        assert!(text.contains("drag started"));
        assert!(text.contains("window_id=7"));
        assert!(!text.contains("filtered out"));
    }

    #[test]
    fn unwritable_log_path_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("wm.log");
        let err = init(Level::INFO, Some(&path)).unwrap_err();
        assert!(matches!(err, DesktopError::LogFile { .. }));
    }
}
