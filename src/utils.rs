use bio::io::fasta;
use flate2::read;
use log::{debug, warn};
use std::error::Error;
use std::ffi::OsStr;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

#[derive(Debug)]
pub enum SequenceError {
    Io { path: String, err: io::Error },
    EmptyFasta { path: String },
    InvalidUtf8 { path: String },
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SequenceError::Io { path, err } => write!(f, "couldn't read {path}: {err}"),
            SequenceError::EmptyFasta { path } => write!(f, "No records found in fasta {path}"),
            SequenceError::InvalidUtf8 { path } => {
                write!(f, "Sequence in {path} is not valid UTF-8")
            }
        }
    }
}

impl Error for SequenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SequenceError::Io { err, .. } => Some(err),
            _ => None,
        }
    }
}

/// Read normal or compressed files seamlessly
/// Uses the presence of a `.gz` extension to decide
pub fn reader(filename: &str) -> io::Result<Box<dyn BufRead>> {
    let path = Path::new(filename);
    let file = File::open(path)?;

    if path.extension() == Some(OsStr::new("gz")) {
        Ok(Box::new(BufReader::with_capacity(
            128 * 1024,
            read::GzDecoder::new(file),
        )))
    } else {
        Ok(Box::new(BufReader::with_capacity(128 * 1024, file)))
    }
}

/// Read the sequence to profile from a plain text or fasta file (optionally gzipped)
/// For fasta only the first record is used
/// Plain text is joined over line breaks unless <verbatim> is set, in which case the file content
/// is used unchanged, including any newlines
pub fn read_sequence(
    filename: &str,
    uppercase: bool,
    verbatim: bool,
) -> Result<String, SequenceError> {
    let io_err = |err: io::Error| SequenceError::Io {
        path: filename.to_string(),
        err,
    };
    let mut bytes = vec![];
    reader(filename)
        .and_then(|mut r| r.read_to_end(&mut bytes))
        .map_err(io_err)?;
    let content = String::from_utf8(bytes).map_err(|_| SequenceError::InvalidUtf8 {
        path: filename.to_string(),
    })?;

    let seq = if content.trim_start().starts_with('>') {
        debug!("Parsing {filename} as fasta");
        let mut records = fasta::Reader::new(content.trim_start().as_bytes()).records();
        let record = records
            .next()
            .ok_or_else(|| SequenceError::EmptyFasta {
                path: filename.to_string(),
            })?
            .map_err(io_err)?;
        if records.next().is_some() {
            warn!(
                "{filename} contains more than one record, only using {}",
                record.id()
            );
        }
        String::from_utf8(record.seq().to_vec()).map_err(|_| SequenceError::InvalidUtf8 {
            path: filename.to_string(),
        })?
    } else if verbatim {
        content
    } else {
        content.lines().map(str::trim).collect::<String>()
    };
    debug!("Read sequence of {} bases from {filename}", seq.len());
    if uppercase {
        Ok(seq.to_uppercase())
    } else {
        Ok(seq)
    }
}
