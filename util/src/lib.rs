// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

/// Writes a 16-bit word as `0x` followed by four uppercase hex digits.
pub fn write_hex_word(w: &mut impl fmt::Write, word: u16) -> fmt::Result {
    write!(w, "{:#06X}", word)
}

/// Writes every byte as `0xHH `, including the space after the last one.
pub fn write_hex_bytes(w: &mut impl fmt::Write, bytes: &[u8]) -> fmt::Result {
    bytes
        .iter()
        .try_for_each(|byte| write!(w, "{:#04X} ", byte))
}

/// Renders `bytes` as printable ASCII, with `.` standing in for everything else.
pub fn ascii_preview(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| {
            if byte.is_ascii_graphic() || *byte == b' ' {
                char::from(*byte)
            } else {
                '.'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_is_zero_padded() {
        let mut s = String::new();
        write_hex_word(&mut s, 0x000a).unwrap();
        assert_eq!(s, "0x000A");
    }

    #[test]
    fn bytes_keep_trailing_space() {
        let mut s = String::new();
        write_hex_bytes(&mut s, &[0x0a, 0xff, 0x00]).unwrap();
        assert_eq!(s, "0x0A 0xFF 0x00 ");
    }

    #[test]
    fn no_bytes_no_output() {
        let mut s = String::new();
        write_hex_bytes(&mut s, &[]).unwrap();
        assert!(s.is_empty());
    }

    #[test]
    fn preview_masks_control_bytes() {
        assert_eq!(ascii_preview(b"SH2\x0a\x03\xc9"), "SH2...");
    }
}
