//! Resolution of write sinks and read sources into open handles.
//!
//! A [`Sink`] names where CSV text goes: an auto-generated file, an explicit
//! path, or a writer owned by the caller. Once the write is done the caller
//! gets a [`Target`] back, which is either the path that was written or the
//! writer itself. A [`Source`] is the reading counterpart.

use std::{
    fs::{File, OpenOptions},
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use log::debug;
use time::{OffsetDateTime, macros::format_description};

use crate::error::CsvError;

use super::build_name;

/// Extension given to auto-generated file names.
pub const DEFAULT_EXTENSION: &str = "csv";

/// Where a writer sends its output.
pub enum Sink<W = File> {
    /// A new timestamp-named file, in the current directory or the given one.
    Auto(Option<PathBuf>),
    /// A file created (or truncated) at this path.
    Path(PathBuf),
    /// An already open writer.
    Writer(W),
}

impl Sink<File> {
    pub fn auto() -> Self {
        Sink::Auto(None)
    }

    pub fn auto_in<P: AsRef<Path>>(dir: P) -> Self {
        Sink::Auto(Some(dir.as_ref().to_path_buf()))
    }

    pub fn path<P: AsRef<Path>>(path: P) -> Self {
        Sink::Path(path.as_ref().to_path_buf())
    }
}

impl<W: Write> Sink<W> {
    pub fn writer(wtr: W) -> Self {
        Sink::Writer(wtr)
    }

    pub(crate) fn open(self) -> Result<Handle<W>, CsvError> {
        match self {
            Sink::Auto(dir) => {
                let (path, file) = create_default(dir.as_deref(), DEFAULT_EXTENSION)?;
                debug!("Writing to generated file {}", path.display());
                Ok(Handle::File { path, file })
            }
            Sink::Path(path) => match File::create(&path) {
                Ok(file) => Ok(Handle::File { path, file }),
                Err(source) => Err(CsvError::Resolution { path, source }),
            },
            Sink::Writer(wtr) => Ok(Handle::Writer(wtr)),
        }
    }
}

impl From<&str> for Sink<File> {
    fn from(path: &str) -> Self {
        Sink::path(path)
    }
}

impl From<&Path> for Sink<File> {
    fn from(path: &Path) -> Self {
        Sink::path(path)
    }
}

impl From<PathBuf> for Sink<File> {
    fn from(path: PathBuf) -> Self {
        Sink::Path(path)
    }
}

/// What a completed write hands back to the caller.
#[derive(Debug)]
pub enum Target<W = File> {
    /// The file that was written; it is closed.
    Path(PathBuf),
    /// The caller's writer, flushed.
    Writer(W),
}

impl<W> Target<W> {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Target::Path(path) => Some(path),
            Target::Writer(_) => None,
        }
    }

    pub fn into_path(self) -> Option<PathBuf> {
        match self {
            Target::Path(path) => Some(path),
            Target::Writer(_) => None,
        }
    }

    pub fn into_writer(self) -> Option<W> {
        match self {
            Target::Path(_) => None,
            Target::Writer(wtr) => Some(wtr),
        }
    }
}

/// Where a reader takes its input from.
pub enum Source<R = File> {
    Path(PathBuf),
    Reader(R),
}

impl Source<File> {
    pub fn path<P: AsRef<Path>>(path: P) -> Self {
        Source::Path(path.as_ref().to_path_buf())
    }
}

impl<R: Read> Source<R> {
    pub fn reader(rdr: R) -> Self {
        Source::Reader(rdr)
    }

    pub(crate) fn open(self) -> Result<Input<R>, CsvError> {
        match self {
            Source::Path(path) => match File::open(&path) {
                Ok(file) => Ok(Input::File(file)),
                Err(source) => Err(CsvError::Resolution { path, source }),
            },
            Source::Reader(rdr) => Ok(Input::Reader(rdr)),
        }
    }
}

impl From<&str> for Source<File> {
    fn from(path: &str) -> Self {
        Source::path(path)
    }
}

impl From<&Path> for Source<File> {
    fn from(path: &Path) -> Self {
        Source::path(path)
    }
}

impl From<PathBuf> for Source<File> {
    fn from(path: PathBuf) -> Self {
        Source::Path(path)
    }
}

/// An open write handle. Dropping it closes the file.
pub(crate) enum Handle<W> {
    File { path: PathBuf, file: File },
    Writer(W),
}

impl<W> Handle<W> {
    pub(crate) fn into_target(self) -> Target<W> {
        match self {
            Handle::File { path, .. } => Target::Path(path),
            Handle::Writer(wtr) => Target::Writer(wtr),
        }
    }
}

impl<W: Write> Write for Handle<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Handle::File { file, .. } => file.write(buf),
            Handle::Writer(wtr) => wtr.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Handle::File { file, .. } => file.flush(),
            Handle::Writer(wtr) => wtr.flush(),
        }
    }
}

/// An open read handle.
pub(crate) enum Input<R> {
    File(File),
    Reader(R),
}

impl<R: Read> Read for Input<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Input::File(file) => file.read(buf),
            Input::Reader(rdr) => rdr.read(buf),
        }
    }
}

/// Formats the current local time (UTC when the offset is unknown) for use
/// in a file name, e.g. `2024-03-09_14-05-59-042`.
pub fn pretty_time() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let format = format_description!(
        "[year]-[month]-[day]_[hour]-[minute]-[second]-[subsecond digits:3]"
    );
    now.format(format).unwrap_or_else(|_| now.unix_timestamp().to_string())
}

/// Creates a new, timestamp-named file with the given extension.
///
/// The file is created exclusively. If the name is taken, a random suffix is
/// appended until a free name is found.
pub fn create_default(dir: Option<&Path>, extension: &str) -> Result<(PathBuf, File), CsvError> {
    let dir = dir.unwrap_or_else(|| Path::new(""));
    let stem = pretty_time();
    let mut path = dir.join(with_extension(&stem, extension));

    loop {
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                let name = format!("{}-{}", stem, build_name());
                path = dir.join(with_extension(&name, extension));
            }
            Err(source) => return Err(CsvError::Resolution { path, source }),
        }
    }
}

fn with_extension(stem: &str, extension: &str) -> String {
    format!("{}.{}", stem, extension.trim_start_matches('.'))
}
