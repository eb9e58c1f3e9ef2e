// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use crate::Record;

/// Spaces between the listing text and the code annotation.
pub const CODE_GAP: usize = 14;

/// Lays out listing lines.
///
/// A line is the line number as five decimal digits, one space, and the rendered body. With
/// `include_code`, the record's bytes follow as a comment:
///
/// ```text
/// 00010       ADD BC,42              ; 0x000A 0x0A 0x06 0x82 0x87 0x2C 0x34 0x32 0x00
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Listing {
    pub include_code: bool,
}

impl Listing {
    pub fn new(include_code: bool) -> Self {
        Self { include_code }
    }

    pub fn line<'a>(&self, record: &'a Record, text: &'a str) -> Line<'a> {
        Line { listing: *self, record, text }
    }

    pub fn format(&self, record: &Record, text: &str) -> String {
        self.line(record, text).to_string()
    }
}

/// One listing line, ready to be displayed. Carries no line ending.
pub struct Line<'a> {
    listing: Listing,
    record: &'a Record,
    text: &'a str,
}

impl fmt::Display for Line<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:05} {}", self.record.line_number(), self.text)?;

        if self.listing.include_code {
            write!(f, "{:gap$}; ", "", gap = CODE_GAP)?;
            zeustxt_util::write_hex_word(f, self.record.line_number())?;
            f.write_str(" ")?;
            zeustxt_util::write_hex_bytes(f, self.record.raw())?;
        }

        Ok(())
    }
}
