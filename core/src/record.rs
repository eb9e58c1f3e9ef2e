// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::io::{self, Read};

use crate::Error;

/// The line number that marks the end of a tokenized file.
pub const SENTINEL: u16 = 0xffff;

/// The byte that ends every record body.
pub const TERMINATOR: u8 = 0x00;

/// How a stream of records finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum End {
    /// The [`SENTINEL`] line number was read.
    Sentinel,
    /// The input ran out, either between records or inside one.
    Exhausted,
}

/// One source line as stored by the editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    line_number: u16,
    /// The body as consumed, [`TERMINATOR`] included if one was read.
    raw: Vec<u8>,
    is_terminated: bool,
}

impl Record {
    pub fn line_number(&self) -> u16 {
        self.line_number
    }

    /// The tokenized text of this line, without the terminator.
    pub fn body(&self) -> &[u8] {
        if self.is_terminated {
            &self.raw[..self.raw.len() - 1]
        } else {
            &self.raw
        }
    }

    /// Every body byte that was consumed for this record, terminator included.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Whether the body ended in a [`TERMINATOR`] rather than at the end of input.
    pub fn is_terminated(&self) -> bool {
        self.is_terminated
    }

    /// The number of bytes this record occupied in the stream.
    pub fn encoded_len(&self) -> usize {
        2 + self.raw.len()
    }
}

/// An iterator over the records of a tokenized file.
///
/// Reading stops at the sentinel or when the input runs out; neither is an error. A body that is
/// cut short by the end of input is still yielded, once. After that, or after an I/O error, the
/// iterator only yields `None`.
pub struct Records<R> {
    bytes: io::Bytes<R>,
    offset: u64,
    end: Option<End>,
    is_fused: bool,
}

impl<R: Read> Records<R> {
    /// Reads records from `reader` one byte at a time. Wrap unbuffered readers in a
    /// [`std::io::BufReader`].
    pub fn new(reader: R) -> Self {
        Self {
            bytes: reader.bytes(),
            offset: 0,
            end: None,
            is_fused: false,
        }
    }

    /// How the stream ended, or `None` if it has not ended (or failed).
    pub fn end(&self) -> Option<End> {
        self.end
    }

    /// The number of bytes consumed so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    fn next_byte(&mut self) -> Result<Option<u8>, Error> {
        let byte = self.bytes.next().transpose().map_err(Error::Io)?;
        if byte.is_some() {
            self.offset += 1;
        }

        Ok(byte)
    }

    fn finish(&mut self, end: End) {
        tracing::debug!("end of records at offset {}: {:?}", self.offset, end);
        self.end = Some(end);
        self.is_fused = true;
    }

    fn read_line_number(&mut self) -> Result<Option<u16>, Error> {
        let lo = match self.next_byte()? {
            Some(it) => it,
            None => {
                self.finish(End::Exhausted);
                return Ok(None);
            }
        };
        let hi = match self.next_byte()? {
            Some(it) => it,
            None => {
                tracing::debug!("ignoring stray byte {:#04x} at end of input", lo);
                self.finish(End::Exhausted);
                return Ok(None);
            }
        };

        match u16::from_le_bytes([lo, hi]) {
            SENTINEL => {
                self.finish(End::Sentinel);
                Ok(None)
            }
            it => Ok(Some(it)),
        }
    }

    fn read_record(&mut self) -> Result<Option<Record>, Error> {
        let line_number = match self.read_line_number()? {
            Some(it) => it,
            None => return Ok(None),
        };

        let mut raw = Vec::new();
        let is_terminated = loop {
            match self.next_byte()? {
                Some(TERMINATOR) => {
                    raw.push(TERMINATOR);
                    break true;
                }
                Some(byte) => raw.push(byte),
                None => {
                    tracing::debug!("line {} is missing its terminator", line_number);
                    self.finish(End::Exhausted);
                    break false;
                }
            }
        };

        tracing::trace!("line {}: {}", line_number, zeustxt_util::ascii_preview(&raw));

        Ok(Some(Record { line_number, raw, is_terminated }))
    }
}

impl<R: Read> Iterator for Records<R> {
    type Item = Result<Record, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_fused {
            return None;
        }

        match self.read_record() {
            Ok(it) => it.map(Ok),
            Err(e) => {
                self.is_fused = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(bytes: &[u8]) -> (Vec<Record>, Option<End>) {
        let mut records = Records::new(bytes);
        let all = records
            .by_ref()
            .collect::<Result<Vec<Record>, Error>>()
            .unwrap();

        (all, records.end())
    }

    #[test]
    fn reads_line_number_little_endian() {
        let (records, end) = read_all(&[0xd2, 0x9d, 0x41, 0x00, 0xff, 0xff]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].line_number(), 40402);
        assert_eq!(records[0].body(), b"A");
        assert_eq!(records[0].raw(), &[0x41, 0x00]);
        assert_eq!(records[0].encoded_len(), 4);
        assert!(records[0].is_terminated());
        assert_eq!(end, Some(End::Sentinel));
    }

    #[test]
    fn empty_input() {
        let (records, end) = read_all(&[]);

        assert!(records.is_empty());
        assert_eq!(end, Some(End::Exhausted));
    }

    #[test]
    fn single_stray_byte() {
        let (records, end) = read_all(&[0x0a]);

        assert!(records.is_empty());
        assert_eq!(end, Some(End::Exhausted));
    }

    #[test]
    fn sentinel_ignores_trailing_bytes() {
        let (records, end) = read_all(&[0xff, 0xff, 0x0a, 0x00, 0x41, 0x00]);

        assert!(records.is_empty());
        assert_eq!(end, Some(End::Sentinel));
    }

    #[test]
    fn sentinel_stops_reading() {
        let input: [u8; 8] = [0x0a, 0x00, 0x00, 0xff, 0xff, 0x14, 0x00, 0x00];
        let mut records = Records::new(&input[..]);

        assert!(records.next().is_some());
        assert!(records.next().is_none());
        assert_eq!(records.offset(), 5);
    }

    #[test]
    fn empty_body() {
        let (records, _) = read_all(&[0x0a, 0x00, 0x00]);

        assert_eq!(records.len(), 1);
        assert!(records[0].body().is_empty());
        assert_eq!(records[0].raw(), &[TERMINATOR]);
    }

    #[test]
    fn truncated_body_is_yielded_once() {
        let input: [u8; 5] = [0x0a, 0x00, 0x0a, 0x06, 0x82];
        let mut records = Records::new(&input[..]);

        let record = records.next().unwrap().unwrap();
        assert_eq!(record.line_number(), 10);
        assert_eq!(record.body(), &[0x0a, 0x06, 0x82]);
        assert_eq!(record.raw(), record.body());
        assert!(!record.is_terminated());

        assert!(records.next().is_none());
        assert!(records.next().is_none());
        assert_eq!(records.end(), Some(End::Exhausted));
    }

    #[test]
    fn missing_sentinel_keeps_terminated_records() {
        let with = [0x0a, 0x00, 0x41, 0x00, 0x14, 0x00, 0x42, 0x00, 0xff, 0xff];
        let without = &with[..with.len() - 2];

        let (with, with_end) = read_all(&with);
        let (without, without_end) = read_all(without);

        assert_eq!(with, without);
        assert_eq!(with_end, Some(End::Sentinel));
        assert_eq!(without_end, Some(End::Exhausted));
    }

    #[test]
    fn io_error_fuses() {
        struct Failing;

        impl Read for Failing {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
            }
        }

        let mut records = Records::new(Failing);

        assert!(matches!(records.next(), Some(Err(Error::Io(_)))));
        assert!(records.next().is_none());
        assert_eq!(records.end(), None);
    }
}
