//! Correction stream input.
//!
//! Reads the JSON-lines package stream produced by the extraction and
//! spell-checking pipeline and turns it into [`Misspelling`]s:
//! - [`InputSource`] picks a file or piped stdin
//! - [`PackageReader`] decodes packages line by line
//! - [`spawn_reader`] hands misspellings to the session from a background
//!   thread

use crate::model::{IngestionError, Misspelling, Package};
use crossbeam::channel::{self, Receiver};
use std::fs::File;
use std::io::{BufRead, BufReader, IsTerminal, Read};
use std::path::PathBuf;
use std::thread;
use tracing::{debug, error, info};

pub mod wire;

pub use wire::{encode_package, parse_package};

/// Where the correction stream comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// A file named on the command line.
    File(PathBuf),
    /// Piped standard input.
    Stdin,
}

impl InputSource {
    /// Open the source for buffered reading.
    ///
    /// # Errors
    ///
    /// [`IngestionError::Open`] if the file cannot be opened.
    pub fn open(&self) -> Result<Box<dyn BufRead + Send>, IngestionError> {
        match self {
            InputSource::File(path) => {
                let file = File::open(path).map_err(|source| IngestionError::Open {
                    path: path.clone(),
                    source,
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
            InputSource::Stdin => Ok(Box::new(BufReader::new(std::io::stdin()))),
        }
    }
}

/// Pick the input source.
///
/// A file path always wins. Without one, stdin is used unless it is an
/// interactive terminal, which would leave the program waiting for input
/// the user never meant to type.
///
/// # Errors
///
/// [`IngestionError::NoInput`] when no file is given and stdin is a TTY.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, IngestionError> {
    match file {
        Some(path) => Ok(InputSource::File(path)),
        None if std::io::stdin().is_terminal() => Err(IngestionError::NoInput),
        None => Ok(InputSource::Stdin),
    }
}

/// Decodes a package per non-blank line.
///
/// Yields `Err` for the first bad line and then stops.
pub struct PackageReader<R: BufRead> {
    reader: R,
    line_no: usize,
    done: bool,
}

impl<R: BufRead> PackageReader<R> {
    /// Wrap a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            done: false,
        }
    }
}

impl<R: Read> PackageReader<BufReader<R>> {
    /// Wrap an unbuffered reader.
    pub fn from_reader(reader: R) -> Self {
        Self::new(BufReader::new(reader))
    }
}

impl<R: BufRead> Iterator for PackageReader<R> {
    type Item = Result<Package, IngestionError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {
                    self.line_no += 1;
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    let result = parse_package(trimmed, self.line_no);
                    if result.is_err() {
                        self.done = true;
                    }
                    return Some(result);
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(IngestionError::Io(e)));
                }
            }
        }
    }
}

/// Read every misspelling in the stream, in stream order.
///
/// # Errors
///
/// The first ingestion error encountered.
pub fn read_all<R: BufRead>(reader: R) -> Result<Vec<Misspelling>, IngestionError> {
    let mut out = Vec::new();
    for package in PackageReader::new(reader) {
        out.extend(package?.misspellings);
    }
    Ok(out)
}

/// Message from the ingestion thread to the session loop.
///
/// The ingestion thread never touches the session list. The loop appends
/// each `Loaded` item itself, so an element is either fully in the list or
/// not there at all.
#[derive(Debug, Clone, PartialEq)]
pub enum Handoff {
    /// One more misspelling, in upstream order.
    Loaded(Misspelling),
    /// Upstream is exhausted.
    Finished,
}

/// Receiving ends of a background stream reader.
///
/// `handoff` ends with [`Handoff::Finished`] when the stream is exhausted,
/// or just closes when it fails. At most one error is ever sent on
/// `errors`, and it closes right after.
pub struct CorrectionStream {
    /// Decoded misspellings, in stream order.
    pub handoff: Receiver<Handoff>,
    /// Upstream failure, if any.
    pub errors: Receiver<IngestionError>,
}

/// Decode `reader` on a background thread.
///
/// The thread stops early when the hand-off receiver is dropped.
pub fn spawn_reader<R>(reader: R) -> std::io::Result<CorrectionStream>
where
    R: BufRead + Send + 'static,
{
    let (h_tx, h_rx) = channel::unbounded();
    let (e_tx, e_rx) = channel::bounded(1);

    thread::Builder::new()
        .name("typofix-ingest".into())
        .spawn(move || {
            let mut count = 0usize;
            for package in PackageReader::new(reader) {
                match package {
                    Ok(package) => {
                        debug!(
                            package = %package.name,
                            misspellings = package.misspellings.len(),
                            "Package decoded"
                        );
                        for m in package.misspellings {
                            if h_tx.send(Handoff::Loaded(m)).is_err() {
                                debug!(count, "Session gone, ingestion stopped");
                                return;
                            }
                            count += 1;
                        }
                    }
                    Err(err) => {
                        error!(error = %err, "Correction stream failed");
                        let _ = e_tx.send(err);
                        return;
                    }
                }
            }
            info!(misspellings = count, "Correction stream finished");
            let _ = h_tx.send(Handoff::Finished);
        })?;

    Ok(CorrectionStream {
        handoff: h_rx,
        errors: e_rx,
    })
}
