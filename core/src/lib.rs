// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoder for the tokenized source files of the Zeus Z80 assembler.
//!
//! A tokenized file is a run of records, each a little-endian line number followed by a body
//! terminated by `0x00`, with `0xffff` in place of a line number marking the end. Bodies mix
//! printable ASCII with spacing codes and single-byte keywords; see [`keyword`] for the codes.

pub mod info;
pub mod keyword;
pub mod listing;
pub mod record;
pub mod render;

use std::{
    fmt,
    io::{self, Read, Write},
};

pub use info::Info;
pub use keyword::{Rule, Table};
pub use listing::Listing;
pub use record::{End, Record, Records};
pub use render::{Renderer, Token};

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for Error {
    fn from(it: io::Error) -> Self {
        Self::Io(it)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Follow each line with the record's bytes in hex.
    pub include_code: bool,
}

/// What [`convert`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    /// Listing lines written, not counting the end-of-listing line.
    pub lines: usize,
    pub undefined_tokens: usize,
    pub end: End,
}

/// Converts a tokenized file into a listing using the stock Zeus keywords.
pub fn convert(
    reader: impl Read,
    writer: impl Write,
    options: ConvertOptions,
) -> Result<Summary, Error> {
    convert_with(reader, writer, options, &Renderer::default())
}

/// Converts a tokenized file into a listing, one `\n`-terminated line per record.
///
/// If the file ends with the sentinel, an empty line closes the listing. A file that simply runs
/// out ends after its last record.
pub fn convert_with(
    reader: impl Read,
    mut writer: impl Write,
    options: ConvertOptions,
    renderer: &Renderer<'_>,
) -> Result<Summary, Error> {
    let listing = Listing::new(options.include_code);
    let mut records = Records::new(reader);
    let mut text = String::new();
    let mut lines = 0;
    let mut undefined_tokens = 0;

    for record in records.by_ref() {
        let record = record?;

        text.clear();
        undefined_tokens += renderer.render_into(record.body(), &mut text);
        writeln!(writer, "{}", listing.line(&record, &text))?;
        lines += 1;
    }

    // `Records` only stops without an error once it has seen the end.
    let end = records.end().unwrap_or(End::Exhausted);
    if end == End::Sentinel {
        writeln!(writer)?;
    }
    writer.flush()?;

    tracing::debug!("converted {} lines; {} undefined tokens", lines, undefined_tokens);

    Ok(Summary { lines, undefined_tokens, end })
}
