// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::ops::RangeInclusive;

use crate::keyword::{self, Rule, Table};

/// Bytes that stand for themselves.
pub const PRINTABLE: RangeInclusive<u8> = 0x20..=0x7e;

/// One classified byte of a record body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    /// Printable ASCII, copied as-is.
    Literal(u8),
    /// A run of spaces. Zero-width for the statement marker.
    Spacing(u8),
    Keyword(&'static str),
    /// A byte the table has no rule for.
    Undefined(u8),
}

impl Token {
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined(_))
    }
}

/// Expands record bodies into listing text.
#[derive(Clone, Copy, Debug)]
pub struct Renderer<'t> {
    table: &'t Table,
}

impl Default for Renderer<'static> {
    fn default() -> Self {
        Self::new(&keyword::ZEUS)
    }
}

impl<'t> Renderer<'t> {
    pub fn new(table: &'t Table) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'t Table {
        self.table
    }

    pub fn classify(&self, byte: u8) -> Token {
        if PRINTABLE.contains(&byte) {
            return Token::Literal(byte);
        }

        match self.table.rule(byte) {
            Rule::Spacing(n) => Token::Spacing(n),
            Rule::Keyword(text) => Token::Keyword(text),
            Rule::Undefined => Token::Undefined(byte),
        }
    }

    pub fn tokens<'b>(&self, body: &'b [u8]) -> Tokens<'t, 'b> {
        Tokens { renderer: *self, bytes: body.iter() }
    }

    /// Renders `body` left to right. Undefined tokens render as nothing.
    pub fn render(&self, body: &[u8]) -> String {
        let mut text = String::with_capacity(body.len() * 2);
        self.render_into(body, &mut text);

        text
    }

    /// Appends the rendering of `body` to `text` and returns the number of undefined tokens.
    pub fn render_into(&self, body: &[u8], text: &mut String) -> usize {
        let mut undefined = 0;
        for (offset, token) in self.tokens(body).enumerate() {
            match token {
                Token::Literal(byte) => text.push(char::from(byte)),
                Token::Spacing(n) => {
                    text.extend(std::iter::repeat(' ').take(usize::from(n)));
                }
                Token::Keyword(it) => text.push_str(it),
                Token::Undefined(byte) => {
                    tracing::debug!("undefined token {:#04x} at offset {}", byte, offset);
                    undefined += 1;
                }
            }
        }

        undefined
    }
}

/// The classified bytes of one body, in order.
pub struct Tokens<'t, 'b> {
    renderer: Renderer<'t>,
    bytes: std::slice::Iter<'b, u8>,
}

impl Iterator for Tokens<'_, '_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.bytes.next().map(|byte| self.renderer.classify(*byte))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.bytes.size_hint()
    }
}
