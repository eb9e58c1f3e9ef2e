// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::{fmt, io::Read};

use crate::{End, Error, Records, Renderer, Token};

/// A summary of a tokenized file, gathered without producing a listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Info {
    pub records: usize,
    pub first_line: Option<u16>,
    pub last_line: Option<u16>,
    /// Bytes consumed up to and including the end marker.
    pub size: u64,
    pub keywords: usize,
    pub literals: usize,
    pub undefined_tokens: usize,
    /// Whether the last record ran into the end of input before its terminator.
    pub is_truncated: bool,
    pub end: Option<End>,
}

impl Info {
    pub fn scan(reader: impl Read, renderer: &Renderer<'_>) -> Result<Self, Error> {
        let mut info = Self::default();
        let mut records = Records::new(reader);

        for record in records.by_ref() {
            let record = record?;

            info.records += 1;
            info.first_line.get_or_insert(record.line_number());
            info.last_line = Some(record.line_number());
            info.is_truncated = !record.is_terminated();

            for token in renderer.tokens(record.body()) {
                match token {
                    Token::Literal(_) => info.literals += 1,
                    Token::Keyword(_) => info.keywords += 1,
                    Token::Undefined(_) => info.undefined_tokens += 1,
                    Token::Spacing(_) => {}
                }
            }
        }

        info.size = records.offset();
        info.end = records.end();

        Ok(info)
    }
}

impl fmt::Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Lines:            {}", self.records)?;
        match (self.first_line, self.last_line) {
            (Some(first), Some(last)) => writeln!(f, "Line numbers:     {:05}..{:05}", first, last)?,
            _ => writeln!(f, "Line numbers:     none")?,
        }
        writeln!(f, "Size:             {} bytes", self.size)?;
        writeln!(f, "Keywords:         {}", self.keywords)?;
        writeln!(f, "Literal bytes:    {}", self.literals)?;
        writeln!(f, "Undefined tokens: {}", self.undefined_tokens)?;

        let end = match self.end {
            Some(End::Sentinel) => "end marker",
            Some(End::Exhausted) if self.is_truncated => "end of file (last line truncated)",
            Some(End::Exhausted) => "end of file (no end marker)",
            None => "unknown",
        };
        write!(f, "Ends at:          {}", end)
    }
}
