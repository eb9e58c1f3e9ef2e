// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The byte-to-text rules of the Zeus editor's tokenizer.

/// The rendering rule attached to one byte value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    /// Renders as this many spaces.
    Spacing(u8),
    /// Renders as fixed text, which may end in a space if the keyword takes an operand.
    Keyword(&'static str),
    /// Renders as nothing.
    Undefined,
}

/// The code of the first keyword; the rest follow contiguously.
pub const FIRST_KEYWORD: u8 = 0x80;

/// Zero-width marker the editor places before a tokenized statement.
pub const STATEMENT_MARKER: u8 = 0x0a;

const KEYWORDS: [&str; 101] = [
    // 0x80
    "A", "ADC ", "ADD ", "AF'", "AF", "AND ", "B", "BC",
    "BIT ", "C", "CALL ", "CCF", "CP ", "CPD", "CPDR", "CPI",
    // 0x90
    "CPIR", "CPL", "D", "DAA", "DE", "DEC ", "DEFB ", "DEFM ",
    "DEFS ", "DEFW ", "DI", "DISP ", "DJNZ ", "E", "EI", "ENT",
    // 0xa0
    "EQU ", "EX ", "EXX", "H", "HALT", "HL", "I", "IM ",
    "IN ", "INC ", "IND", "INDR", "INI", "INIR", "IX", "IY",
    // 0xb0
    "JP ", "JR ", "L", "LD ", "LDD", "LDDR", "LDI", "LDIR",
    "M", "NC", "NEG", "NOP", "NV", "NZ", "OR ", "ORG ",
    // 0xc0
    "OTDR", "OTIR", "OUT ", "OUTD", "OUTI", "P", "PE", "PO",
    "POP ", "PUSH ", "R", "RES ", "RET", "RETI", "RETN", "RL ",
    // 0xd0
    "RLA", "RLC ", "RLCA", "RLD", "RR ", "RRA", "RRC ", "RRCA",
    "RRD", "RST ", "SBC ", "SCF", "SET ", "SLA ", "SP", "SRA ",
    // 0xe0
    "SRL ", "SUB ", "V", "XOR ", "Z",
];

/// The rules of the stock Zeus tokenizer.
pub static ZEUS: Table = Table::zeus();

/// A complete mapping from byte value to [`Rule`].
///
/// Tables are immutable once built. The decoder only ever borrows one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    rules: [Rule; 256],
}

impl Table {
    /// A table in which every byte is [`Rule::Undefined`].
    pub const fn empty() -> Self {
        Self { rules: [Rule::Undefined; 256] }
    }

    /// The stock Zeus table.
    ///
    /// `0x01..=0x1f` are spacing codes, except [`STATEMENT_MARKER`], which is zero-width.
    /// Keywords start at [`FIRST_KEYWORD`] in alphabetical order and end at `0xe4`. Every other
    /// code, `0xff` included, is undefined.
    pub const fn zeus() -> Self {
        let mut table = Self::empty();

        let mut code = 0x01;
        while code < 0x20 {
            table.rules[code as usize] = if code == STATEMENT_MARKER {
                Rule::Spacing(0)
            } else {
                Rule::Spacing(code)
            };
            code += 1;
        }

        let mut i = 0;
        while i < KEYWORDS.len() {
            table.rules[FIRST_KEYWORD as usize + i] = Rule::Keyword(KEYWORDS[i]);
            i += 1;
        }

        table
    }

    /// Returns a copy of this table with the rule for `code` replaced.
    pub const fn with(mut self, code: u8, rule: Rule) -> Self {
        self.rules[code as usize] = rule;
        self
    }

    pub fn rule(&self, code: u8) -> Rule {
        self.rules[usize::from(code)]
    }

    /// Iterates over every code that renders as a keyword.
    pub fn keywords(&self) -> impl Iterator<Item = (u8, &'static str)> + '_ {
        self.rules
            .iter()
            .enumerate()
            .filter_map(|(code, rule)| match rule {
                Rule::Keyword(text) => Some((code as u8, *text)),
                _ => None,
            })
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::zeus()
    }
}
