//! File-level entry point: extension check, read, parse.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{LoadError, NcfError, Result};
use crate::model::Document;
use crate::parser::{self, ParseOptions};

/// Read and parse an NCF file with default options.
///
/// The path must end in `.ncf` (case-insensitive); this is checked before
/// touching the filesystem, so `InvalidFileType` wins over `FileNotFound`
/// for a path that is wrong on both counts.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    load_file_with_options(path, &ParseOptions::default())
}

/// Read and parse an NCF file with explicit parse options.
pub fn load_file_with_options<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Document> {
    let path = path.as_ref();

    let is_ncf = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ncf"));
    if !is_ncf {
        return Err(LoadError::InvalidFileType {
            path: path.to_path_buf(),
        }
        .into());
    }

    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    parser::parse_with_options(&text, options).map_err(NcfError::from)
}
