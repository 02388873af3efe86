use crate::error::{QcError, Result};
use niffler::get_reader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Opens a text input, decompressing gzip/bzip2/xz transparently.
pub(crate) fn open_text(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|e| QcError::io(path, e))?;
    match get_reader(Box::new(file)) {
        Ok((inner_reader, _compression)) => Ok(Box::new(BufReader::new(inner_reader))),
        // Too short to carry a compression header, so read it as plain text
        Err(niffler::Error::FileTooShort) => {
            let file = File::open(path).map_err(|e| QcError::io(path, e))?;
            Ok(Box::new(BufReader::new(file)))
        }
        Err(e) => Err(QcError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()),
        )),
    }
}

/// Yields `(1-based line number, line)` for every line that is neither blank nor a
/// `#` comment.
pub(crate) fn data_lines(
    path: &Path,
    reader: Box<dyn BufRead>,
) -> impl Iterator<Item = Result<(usize, String)>> + '_ {
    reader
        .lines()
        .enumerate()
        .filter_map(move |(idx, line)| match line {
            Ok(line) => {
                let trimmed = line.trim_end_matches(['\r', '\n']);
                if trimmed.trim().is_empty() || trimmed.starts_with('#') {
                    None
                } else {
                    Some(Ok((idx + 1, trimmed.to_string())))
                }
            }
            Err(e) => Some(Err(QcError::io(path, e))),
        })
}
