//! TOML parsing.
//!
//! A single-pass recursive-descent parser over the source characters. It builds the
//! [`Table`] tree directly and stops at the first error, returning a
//! [`ParseError`] whose region covers the offending token or construct.
//!
//! ## Table definitions
//!
//! TOML forbids defining the same table twice, and restricts how tables created in
//! one way may later be extended in another. The parser records how each table
//! came to exist, keyed by its path from the root (array-of-tables elements are
//! part of the path):
//!
//! - **implicit**: created as a parent by a header such as `[a.b]`; a later `[a]`
//!   may still define it once
//! - **header**: defined by `[a]`; never defined again
//! - **dotted**: created by a dotted key such as `a.b = 1`; only further dotted
//!   keys may add to it, but headers may pass through it
//! - **array of tables**: created by `[[a]]`; only `[[a]]` may append to it
//!
//! Inline tables and static arrays have no record and are sealed.

use crate::datetime::days_in_month;
use crate::{
    Array, Date, DateTime, Integer, IntegerBase, Node, ParseError, SourcePosition, SourceRegion,
    Table, Time,
};
use std::collections::HashMap;

type PResult<T> = std::result::Result<T, ParseError>;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Segment {
    Key(String),
    Index(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TableState {
    Implicit,
    Header,
    Dotted,
    ArrayOfTables,
}

struct Key {
    name: String,
    region: SourceRegion,
}

/// Parses a complete TOML document.
pub(crate) fn parse_document(input: &str) -> PResult<Table> {
    let mut parser = Parser::new(input);
    let root = parser.parse_document()?;
    log::debug!("parsed TOML document with {} top-level keys", root.len());
    Ok(root)
}

/// Parses a single standalone TOML value such as `1979-05-27` or `0xff`.
pub(crate) fn parse_literal(input: &str) -> PResult<Node> {
    let mut parser = Parser::new(input);
    parser.skip_whitespace();
    let begin = parser.current();
    let node = parser.parse_value(begin)?;
    parser.skip_whitespace();
    if !parser.at_end() {
        return Err(parser.error_here(format!(
            "unexpected {} after value",
            describe(parser.peek_char())
        )));
    }
    Ok(node)
}

struct Parser<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
    states: HashMap<Vec<Segment>, TableState>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        let position = if input.starts_with('\u{feff}') {
            '\u{feff}'.len_utf8()
        } else {
            0
        };
        Parser {
            input,
            position,
            line: 1,
            column: 1,
            states: HashMap::new(),
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.input[self.position..].chars().nth(n)
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current(&self) -> SourcePosition {
        SourcePosition::new(self.line, self.column)
    }

    /// Error spanning `[begin, current)`.
    fn error_at(&self, begin: SourcePosition, description: impl Into<String>) -> ParseError {
        ParseError::new(description, SourceRegion::new(begin, self.current()))
    }

    /// Error spanning the next character, or empty at end of input.
    fn error_here(&self, description: impl Into<String>) -> ParseError {
        let begin = self.current();
        let end = match self.peek_char() {
            Some(_) => SourcePosition::new(self.line, self.column + 1),
            None => begin,
        };
        ParseError::new(description, SourceRegion::new(begin, end))
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek_char(), Some(' ') | Some('\t')) {
            self.next_char();
        }
    }

    fn consume_newline(&mut self) -> bool {
        match self.peek_char() {
            Some('\n') => {
                self.next_char();
                true
            }
            Some('\r') if self.peek_nth(1) == Some('\n') => {
                self.next_char();
                self.next_char();
                true
            }
            _ => false,
        }
    }

    fn skip_comment(&mut self) -> PResult<()> {
        if self.peek_char() != Some('#') {
            return Ok(());
        }
        self.next_char();
        while let Some(ch) = self.peek_char() {
            match ch {
                '\n' => break,
                '\r' if self.peek_nth(1) == Some('\n') => break,
                c if is_invalid_control(c) => {
                    return Err(self.error_here(format!(
                        "control character U+{:04X} is not allowed in comments",
                        c as u32
                    )));
                }
                _ => {
                    self.next_char();
                }
            }
        }
        Ok(())
    }

    fn skip_trivia(&mut self) -> PResult<()> {
        loop {
            self.skip_whitespace();
            if self.peek_char() == Some('#') {
                self.skip_comment()?;
            } else if !self.consume_newline() {
                return Ok(());
            }
        }
    }

    fn expect_line_end(&mut self) -> PResult<()> {
        self.skip_whitespace();
        self.skip_comment()?;
        if self.at_end() || self.consume_newline() {
            Ok(())
        } else {
            Err(self.error_here(format!(
                "expected a newline, found {}",
                describe(self.peek_char())
            )))
        }
    }

    fn parse_document(&mut self) -> PResult<Table> {
        let mut root = Table::new();
        let mut current: Vec<Segment> = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek_char() {
                None => break,
                Some('#') | Some('\n') | Some('\r') => {}
                Some('[') => current = self.parse_table_header(&mut root)?,
                Some(_) => {
                    let table = resolve_mut(&mut root, &current)
                        .ok_or_else(|| self.error_here("current table is no longer reachable"))?;
                    self.parse_key_value(table, &current, false)?;
                }
            }
            self.expect_line_end()?;
        }

        Ok(root)
    }

    fn parse_key(&mut self) -> PResult<Vec<Key>> {
        let mut keys = Vec::new();
        loop {
            self.skip_whitespace();
            keys.push(self.parse_simple_key()?);
            self.skip_whitespace();
            if self.peek_char() != Some('.') {
                return Ok(keys);
            }
            self.next_char();
        }
    }

    fn parse_simple_key(&mut self) -> PResult<Key> {
        let begin = self.current();
        let name = match self.peek_char() {
            Some('"') if self.peek_nth(1) == Some('"') && self.peek_nth(2) == Some('"') => {
                return Err(self.error_here("multi-line strings cannot be used as keys"));
            }
            Some('\'') if self.peek_nth(1) == Some('\'') && self.peek_nth(2) == Some('\'') => {
                return Err(self.error_here("multi-line strings cannot be used as keys"));
            }
            Some('"') => self.parse_basic_string()?,
            Some('\'') => self.parse_literal_string()?,
            Some(c) if is_bare_key_char(c) => {
                let start = self.position;
                while self.peek_char().is_some_and(is_bare_key_char) {
                    self.next_char();
                }
                self.input[start..self.position].to_string()
            }
            other => {
                return Err(self.error_here(format!("expected a key, found {}", describe(other))));
            }
        };
        Ok(Key {
            name,
            region: SourceRegion::new(begin, self.current()),
        })
    }

    fn parse_key_value(&mut self, table: &mut Table, base: &[Segment], inline: bool) -> PResult<()> {
        let keys = self.parse_key()?;
        if self.peek_char() != Some('=') {
            return Err(self.error_here(format!(
                "expected '=' after key, found {}",
                describe(self.peek_char())
            )));
        }
        self.next_char();
        let after_eq = self.current();
        self.skip_whitespace();
        let value = self.parse_value(after_eq)?;
        self.insert_dotted(table, base, keys, value, inline)
    }

    /// Walks the dotted `keys` below `table`, creating dotted tables on the way,
    /// and inserts `value` under the last key.
    fn insert_dotted(
        &mut self,
        table: &mut Table,
        base: &[Segment],
        keys: Vec<Key>,
        value: Node,
        inline: bool,
    ) -> PResult<()> {
        let Some((last, parents)) = keys.split_last() else {
            return Err(self.error_here("expected a key"));
        };

        let mut table = table;
        let mut path = base.to_vec();
        for key in parents {
            path.push(Segment::Key(key.name.clone()));
            if !table.contains_key(&key.name) {
                let child = if inline {
                    Table::new_inline()
                } else {
                    Table::new()
                };
                table.insert_or_assign(key.name.clone(), child);
                self.states.insert(path.clone(), TableState::Dotted);
            } else if self.states.get(&path) != Some(&TableState::Dotted) {
                return Err(ParseError::new(
                    format!(
                        "cannot add to '{}' with a dotted key: it is already defined",
                        key.name
                    ),
                    key.region,
                ));
            }
            table = match table.get_mut(&key.name) {
                Some(Node::Table(child)) => child,
                _ => {
                    return Err(ParseError::new(
                        format!("key '{}' is not a table", key.name),
                        key.region,
                    ))
                }
            };
        }

        if table.contains_key(&last.name) {
            return Err(ParseError::new(
                format!("duplicate key '{}'", last.name),
                last.region,
            ));
        }
        table.insert_or_assign(last.name.clone(), value);
        Ok(())
    }

    fn parse_table_header(&mut self, root: &mut Table) -> PResult<Vec<Segment>> {
        let begin = self.current();
        self.next_char();
        let is_array = self.peek_char() == Some('[');
        if is_array {
            self.next_char();
        }

        let keys = self.parse_key()?;
        if self.peek_char() != Some(']') {
            return Err(self.error_here(format!(
                "expected ']' to close the table header, found {}",
                describe(self.peek_char())
            )));
        }
        self.next_char();
        if is_array {
            if self.peek_char() != Some(']') {
                return Err(self.error_here("expected ']]' to close the array-of-tables header"));
            }
            self.next_char();
        }

        let name = keys
            .iter()
            .map(|k| k.name.as_str())
            .collect::<Vec<_>>()
            .join(".");
        let region = SourceRegion::new(begin, self.current());
        log::trace!(
            "opening {} '{}'",
            if is_array { "array of tables" } else { "table" },
            name
        );
        self.open_table(root, &keys, is_array, &name, region)
    }

    /// Resolves a header to the table it names and returns that table's path.
    fn open_table(
        &mut self,
        root: &mut Table,
        keys: &[Key],
        is_array: bool,
        name: &str,
        region: SourceRegion,
    ) -> PResult<Vec<Segment>> {
        let Some((last, parents)) = keys.split_last() else {
            return Err(ParseError::new("expected a table name", region));
        };

        let mut table = root;
        let mut path = Vec::new();
        for key in parents {
            path.push(Segment::Key(key.name.clone()));
            if !table.contains_key(&key.name) {
                table.insert_or_assign(key.name.clone(), Table::new());
                self.states.insert(path.clone(), TableState::Implicit);
            }
            let state = self.states.get(&path).copied();
            table = match (table.get_mut(&key.name), state) {
                (Some(Node::Table(child)), Some(_)) => child,
                (Some(Node::Array(array)), Some(TableState::ArrayOfTables)) => {
                    path.push(Segment::Index(array.len().saturating_sub(1)));
                    match array.last_mut() {
                        Some(Node::Table(child)) => child,
                        _ => {
                            return Err(ParseError::new(
                                format!("'{}' is not an array of tables", key.name),
                                key.region,
                            ))
                        }
                    }
                }
                _ => {
                    return Err(ParseError::new(
                        format!(
                            "cannot define table '{}': '{}' is already defined as a value",
                            name, key.name
                        ),
                        key.region,
                    ))
                }
            };
        }

        path.push(Segment::Key(last.name.clone()));
        if is_array {
            if !table.contains_key(&last.name) {
                table.insert_or_assign(last.name.clone(), Array::new());
                self.states.insert(path.clone(), TableState::ArrayOfTables);
            }
            let state = self.states.get(&path).copied();
            match (table.get_mut(&last.name), state) {
                (Some(Node::Array(array)), Some(TableState::ArrayOfTables)) => {
                    array.push(Table::new());
                    path.push(Segment::Index(array.len() - 1));
                }
                _ => {
                    return Err(ParseError::new(
                        format!(
                            "cannot define array of tables '{}': the key is already defined",
                            name
                        ),
                        region,
                    ))
                }
            }
        } else {
            match (table.get(&last.name), self.states.get(&path).copied()) {
                (None, _) => {
                    table.insert_or_assign(last.name.clone(), Table::new());
                }
                (Some(Node::Table(_)), Some(TableState::Implicit)) => {}
                _ => {
                    return Err(ParseError::new(
                        format!("table '{}' is already defined", name),
                        region,
                    ))
                }
            }
            self.states.insert(path.clone(), TableState::Header);
        }

        Ok(path)
    }

    fn parse_value(&mut self, begin: SourcePosition) -> PResult<Node> {
        match self.peek_char() {
            Some('"') => {
                if self.peek_nth(1) == Some('"') && self.peek_nth(2) == Some('"') {
                    self.parse_multiline_basic_string().map(Node::String)
                } else {
                    self.parse_basic_string().map(Node::String)
                }
            }
            Some('\'') => {
                if self.peek_nth(1) == Some('\'') && self.peek_nth(2) == Some('\'') {
                    self.parse_multiline_literal_string().map(Node::String)
                } else {
                    self.parse_literal_string().map(Node::String)
                }
            }
            Some('[') => self.parse_array().map(Node::Array),
            Some('{') => self.parse_inline_table().map(Node::Table),
            Some(c) if c.is_ascii_digit() || matches!(c, '+' | '-' | 't' | 'f' | 'i' | 'n') => {
                self.parse_scalar()
            }
            other => {
                let description = format!("expected a value, found {}", describe(other));
                // a missing value spans the gap after `=`; a stray token spans itself
                let missing = matches!(other, None | Some('\n') | Some('\r') | Some('#'));
                if missing && begin != self.current() {
                    Err(self.error_at(begin, description))
                } else {
                    Err(self.error_here(description))
                }
            }
        }
    }

    /// Booleans, numbers, and dates/times: everything written as a bare token.
    fn parse_scalar(&mut self) -> PResult<Node> {
        let begin = self.current();
        let mut token = self.scan_token().to_string();

        // `1979-05-27 07:32:00` uses a space instead of `T`
        if token.len() == 10
            && looks_like_date(&token)
            && self.peek_char() == Some(' ')
            && self.peek_nth(1).is_some_and(|c| c.is_ascii_digit())
            && self.peek_nth(2).is_some_and(|c| c.is_ascii_digit())
            && self.peek_nth(3) == Some(':')
        {
            self.next_char();
            token.push('T');
            token.push_str(self.scan_token());
        }

        let region = SourceRegion::new(begin, self.current());
        let result = match token.as_str() {
            "true" => Ok(Node::Boolean(true)),
            "false" => Ok(Node::Boolean(false)),
            t if looks_like_date(t) || looks_like_time(t) => parse_temporal(t),
            t => parse_number(t),
        };
        result.map_err(|description| ParseError::new(description, region))
    }

    fn scan_token(&mut self) -> &'a str {
        let start = self.position;
        while self
            .peek_char()
            .is_some_and(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-' | '.' | ':'))
        {
            self.next_char();
        }
        &self.input[start..self.position]
    }

    fn parse_escape(&mut self, out: &mut String, begin: SourcePosition) -> PResult<()> {
        let ch = match self.next_char() {
            Some('b') => '\u{0008}',
            Some('t') => '\t',
            Some('n') => '\n',
            Some('f') => '\u{000C}',
            Some('r') => '\r',
            Some('"') => '"',
            Some('\\') => '\\',
            Some('u') => self.parse_unicode_escape(4, begin)?,
            Some('U') => self.parse_unicode_escape(8, begin)?,
            Some(other) => {
                return Err(self.error_at(
                    begin,
                    format!("invalid escape sequence '\\{}'", other.escape_debug()),
                ))
            }
            None => return Err(self.error_at(begin, "unterminated escape sequence")),
        };
        out.push(ch);
        Ok(())
    }

    fn parse_unicode_escape(&mut self, digits: usize, begin: SourcePosition) -> PResult<char> {
        let mut code_point = 0u32;
        for _ in 0..digits {
            match self.peek_char().and_then(|c| c.to_digit(16)) {
                Some(digit) => {
                    self.next_char();
                    code_point = code_point * 16 + digit;
                }
                None => {
                    return Err(self.error_at(
                        begin,
                        format!("unicode escape requires {} hex digits", digits),
                    ))
                }
            }
        }
        char::from_u32(code_point).ok_or_else(|| {
            self.error_at(
                begin,
                format!("U+{:X} is not a valid unicode scalar value", code_point),
            )
        })
    }

    fn parse_basic_string(&mut self) -> PResult<String> {
        let begin = self.current();
        self.next_char();
        let mut result = String::new();
        loop {
            let here = self.current();
            match self.peek_char() {
                None | Some('\n') => return Err(self.error_at(begin, "unterminated string")),
                Some('"') => {
                    self.next_char();
                    return Ok(result);
                }
                Some('\\') => {
                    self.next_char();
                    self.parse_escape(&mut result, here)?;
                }
                Some(c) if is_invalid_control(c) => {
                    return Err(self.error_here(format!(
                        "control character U+{:04X} must be escaped",
                        c as u32
                    )))
                }
                Some(c) => {
                    self.next_char();
                    result.push(c);
                }
            }
        }
    }

    fn parse_multiline_basic_string(&mut self) -> PResult<String> {
        let begin = self.current();
        for _ in 0..3 {
            self.next_char();
        }
        self.consume_newline();

        let mut result = String::new();
        loop {
            let here = self.current();
            match self.peek_char() {
                None => return Err(self.error_at(begin, "unterminated multi-line string")),
                Some('"') => {
                    if self.close_multiline('"', &mut result)? {
                        return Ok(result);
                    }
                }
                Some('\\') => {
                    self.next_char();
                    if self.at_line_ending_backslash() {
                        self.skip_blank_lines();
                    } else {
                        self.parse_escape(&mut result, here)?;
                    }
                }
                Some('\n') => {
                    self.next_char();
                    result.push('\n');
                }
                Some('\r') if self.peek_nth(1) == Some('\n') => {
                    self.consume_newline();
                    result.push('\n');
                }
                Some(c) if is_invalid_control(c) => {
                    return Err(self.error_here(format!(
                        "control character U+{:04X} must be escaped",
                        c as u32
                    )))
                }
                Some(c) => {
                    self.next_char();
                    result.push(c);
                }
            }
        }
    }

    fn parse_literal_string(&mut self) -> PResult<String> {
        let begin = self.current();
        self.next_char();
        let start = self.position;
        loop {
            match self.peek_char() {
                None | Some('\n') => return Err(self.error_at(begin, "unterminated literal string")),
                Some('\'') => {
                    let content = self.input[start..self.position].to_string();
                    self.next_char();
                    return Ok(content);
                }
                Some(c) if is_invalid_control(c) => {
                    return Err(self.error_here(format!(
                        "control character U+{:04X} is not allowed in literal strings",
                        c as u32
                    )))
                }
                Some(_) => {
                    self.next_char();
                }
            }
        }
    }

    fn parse_multiline_literal_string(&mut self) -> PResult<String> {
        let begin = self.current();
        for _ in 0..3 {
            self.next_char();
        }
        self.consume_newline();

        let mut result = String::new();
        loop {
            match self.peek_char() {
                None => {
                    return Err(self.error_at(begin, "unterminated multi-line literal string"))
                }
                Some('\'') => {
                    if self.close_multiline('\'', &mut result)? {
                        return Ok(result);
                    }
                }
                Some('\n') => {
                    self.next_char();
                    result.push('\n');
                }
                Some('\r') if self.peek_nth(1) == Some('\n') => {
                    self.consume_newline();
                    result.push('\n');
                }
                Some(c) if is_invalid_control(c) => {
                    return Err(self.error_here(format!(
                        "control character U+{:04X} is not allowed in literal strings",
                        c as u32
                    )))
                }
                Some(c) => {
                    self.next_char();
                    result.push(c);
                }
            }
        }
    }

    /// Consumes a run of `quote` characters inside a multi-line string. Returns
    /// `true` if the run closes the string; up to two quotes may precede the
    /// closing delimiter.
    fn close_multiline(&mut self, quote: char, out: &mut String) -> PResult<bool> {
        let run = self.input[self.position..]
            .chars()
            .take_while(|&c| c == quote)
            .count();
        if run > 5 {
            return Err(self.error_here("too many quotes at the end of a multi-line string"));
        }
        for _ in 0..run {
            self.next_char();
        }
        let content = if run >= 3 { run - 3 } else { run };
        out.extend(std::iter::repeat(quote).take(content));
        Ok(run >= 3)
    }

    fn at_line_ending_backslash(&self) -> bool {
        let rest = self.input[self.position..].trim_start_matches(|c| c == ' ' || c == '\t');
        rest.starts_with('\n') || rest.starts_with("\r\n")
    }

    fn skip_blank_lines(&mut self) {
        loop {
            self.skip_whitespace();
            if !self.consume_newline() {
                return;
            }
        }
    }

    fn parse_array(&mut self) -> PResult<Array> {
        let begin = self.current();
        self.next_char();
        let mut array = Array::new();
        loop {
            self.skip_trivia()?;
            match self.peek_char() {
                Some(']') => {
                    self.next_char();
                    return Ok(array);
                }
                None => return Err(self.error_at(begin, "unterminated array")),
                _ => {}
            }

            let here = self.current();
            array.push(self.parse_value(here)?);

            self.skip_trivia()?;
            match self.peek_char() {
                Some(',') => {
                    self.next_char();
                }
                Some(']') => {
                    self.next_char();
                    return Ok(array);
                }
                None => return Err(self.error_at(begin, "unterminated array")),
                other => {
                    return Err(self.error_here(format!(
                        "expected ',' or ']' in array, found {}",
                        describe(other)
                    )))
                }
            }
        }
    }

    fn parse_inline_table(&mut self) -> PResult<Table> {
        let begin = self.current();
        self.next_char();
        let mut table = Table::new_inline();

        // Definitions inside an inline table are relative to it and end with it
        let outer = std::mem::take(&mut self.states);
        let result = self.parse_inline_entries(&mut table, begin);
        self.states = outer;

        result.map(|()| table)
    }

    fn parse_inline_entries(&mut self, table: &mut Table, begin: SourcePosition) -> PResult<()> {
        self.skip_whitespace();
        if self.peek_char() == Some('}') {
            self.next_char();
            return Ok(());
        }

        loop {
            self.skip_whitespace();
            match self.peek_char() {
                None => return Err(self.error_at(begin, "unterminated inline table")),
                Some('\n') | Some('\r') => {
                    return Err(self.error_here("inline tables must be written on a single line"))
                }
                _ => {}
            }

            self.parse_key_value(table, &[], true)?;

            self.skip_whitespace();
            match self.peek_char() {
                Some(',') => {
                    self.next_char();
                }
                Some('}') => {
                    self.next_char();
                    return Ok(());
                }
                None => return Err(self.error_at(begin, "unterminated inline table")),
                other => {
                    return Err(self.error_here(format!(
                        "expected ',' or '}}' in inline table, found {}",
                        describe(other)
                    )))
                }
            }
        }
    }
}

fn resolve_mut<'t>(root: &'t mut Table, path: &[Segment]) -> Option<&'t mut Table> {
    let mut table = root;
    let mut segments = path.iter();
    while let Some(segment) = segments.next() {
        let Segment::Key(key) = segment else {
            return None;
        };
        table = match table.get_mut(key)? {
            Node::Table(child) => child,
            Node::Array(array) => match segments.next() {
                Some(Segment::Index(index)) => array.get_mut(*index)?.as_table_mut()?,
                _ => return None,
            },
            _ => return None,
        };
    }
    Some(table)
}

fn describe(ch: Option<char>) -> String {
    match ch {
        None => "end of input".to_string(),
        Some('\n') | Some('\r') => "a newline".to_string(),
        Some(c) => format!("'{}'", c.escape_debug()),
    }
}

fn is_bare_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn is_invalid_control(c: char) -> bool {
    (c < ' ' && c != '\t') || c == '\u{7f}'
}

fn looks_like_date(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() >= 5 && bytes[..4].iter().all(u8::is_ascii_digit) && bytes[4] == b'-'
}

fn looks_like_time(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() >= 3 && bytes[..2].iter().all(u8::is_ascii_digit) && bytes[2] == b':'
}

/// Parses exactly `len` ASCII digits.
fn fixed_digits(s: &str, len: usize) -> Option<u32> {
    if s.len() == len && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

/// Removes `_` separators. Each separator must sit between two digits.
fn strip_underscores(s: &str, is_digit: impl Fn(char) -> bool) -> Option<String> {
    let mut out = String::with_capacity(s.len());
    let mut after_separator = true;
    for c in s.chars() {
        if c == '_' {
            if after_separator {
                return None;
            }
            after_separator = true;
        } else if is_digit(c) {
            out.push(c);
            after_separator = false;
        } else {
            return None;
        }
    }
    if after_separator {
        None
    } else {
        Some(out)
    }
}

fn parse_number(token: &str) -> Result<Node, String> {
    let (sign, body) = match token.as_bytes().first() {
        Some(b'+') => ("+", &token[1..]),
        Some(b'-') => ("-", &token[1..]),
        _ => ("", token),
    };

    match body {
        "inf" if sign == "-" => return Ok(Node::Float(f64::NEG_INFINITY)),
        "inf" => return Ok(Node::Float(f64::INFINITY)),
        "nan" => return Ok(Node::Float(f64::NAN)),
        _ => {}
    }

    let prefixed = match body.get(..2) {
        Some("0x") => Some((16, IntegerBase::Hexadecimal, "hexadecimal")),
        Some("0o") => Some((8, IntegerBase::Octal, "octal")),
        Some("0b") => Some((2, IntegerBase::Binary, "binary")),
        _ => None,
    };
    if let Some((radix, base, name)) = prefixed {
        if !sign.is_empty() {
            return Err(format!("{} integers cannot have a sign", name));
        }
        let digits = strip_underscores(&body[2..], |c| c.is_digit(radix))
            .ok_or_else(|| format!("invalid {} integer '{}'", name, token))?;
        return i64::from_str_radix(&digits, radix)
            .map(|value| Node::Integer(Integer::with_base(value, base)))
            .map_err(|_| format!("integer '{}' is out of range", token));
    }

    if body.contains(|c| matches!(c, '.' | 'e' | 'E')) {
        return parse_float(token, sign, body);
    }

    let digits = strip_underscores(body, |c| c.is_ascii_digit())
        .ok_or_else(|| format!("invalid value '{}'", token))?;
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(format!("leading zeros are not allowed in '{}'", token));
    }
    format!("{}{}", sign, digits)
        .parse::<i64>()
        .map(|value| Node::Integer(Integer::new(value)))
        .map_err(|_| format!("integer '{}' is out of range", token))
}

fn parse_float(token: &str, sign: &str, body: &str) -> Result<Node, String> {
    let invalid = || format!("invalid float '{}'", token);

    let (mantissa, exponent) = match body.find(|c| c == 'e' || c == 'E') {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    };
    let (integral, fraction) = match mantissa.split_once('.') {
        Some((integral, fraction)) => (integral, Some(fraction)),
        None => (mantissa, None),
    };

    let integral = strip_underscores(integral, |c| c.is_ascii_digit()).ok_or_else(invalid)?;
    if integral.len() > 1 && integral.starts_with('0') {
        return Err(format!("leading zeros are not allowed in '{}'", token));
    }

    let mut text = format!("{}{}", sign, integral);
    if let Some(fraction) = fraction {
        let digits = strip_underscores(fraction, |c| c.is_ascii_digit())
            .ok_or_else(|| format!("expected digits after the decimal point in '{}'", token))?;
        text.push('.');
        text.push_str(&digits);
    }
    if let Some(exponent) = exponent {
        let (exp_sign, exp_digits) = match exponent.as_bytes().first() {
            Some(b'+') | Some(b'-') => exponent.split_at(1),
            _ => ("", exponent),
        };
        let digits = strip_underscores(exp_digits, |c| c.is_ascii_digit())
            .ok_or_else(|| format!("invalid exponent in '{}'", token))?;
        text.push('e');
        text.push_str(exp_sign);
        text.push_str(&digits);
    }

    text.parse::<f64>().map(Node::Float).map_err(|_| invalid())
}

fn parse_temporal(token: &str) -> Result<Node, String> {
    if looks_like_time(token) {
        return parse_time(token).map(Node::Time);
    }

    let date = parse_date(token.get(..10).unwrap_or(token))?;
    if token.len() == 10 {
        return Ok(Node::Date(date));
    }
    let rest = &token[10..];
    if !matches!(rest.as_bytes()[0], b'T' | b't') {
        return Err(format!("invalid date-time '{}'", token));
    }
    let rest = &rest[1..];

    let offset_start = rest
        .find(|c| matches!(c, 'Z' | 'z' | '+' | '-'))
        .unwrap_or(rest.len());
    let time = parse_time(&rest[..offset_start])?;
    let offset = match &rest[offset_start..] {
        "" => None,
        offset => Some(parse_offset(offset)?),
    };
    Ok(Node::DateTime(DateTime::new(date, time, offset)))
}

fn parse_date(s: &str) -> Result<Date, String> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return Err(format!("invalid date '{}', expected YYYY-MM-DD", s));
    }
    let field = |range: std::ops::Range<usize>| {
        fixed_digits(&s[range.clone()], range.len())
            .ok_or_else(|| format!("invalid date '{}', expected YYYY-MM-DD", s))
    };
    let year = field(0..4)? as u16;
    let month = field(5..7)? as u8;
    let day = field(8..10)? as u8;

    if !(1..=12).contains(&month) {
        return Err(format!("month {:02} is out of range in '{}'", month, s));
    }
    if day == 0 || day > days_in_month(year, month) {
        return Err(format!("day {:02} is out of range for the month in '{}'", day, s));
    }
    Ok(Date::new(year, month, day))
}

fn parse_time(s: &str) -> Result<Time, String> {
    let invalid = || format!("invalid time '{}', expected HH:MM:SS", s);
    let bytes = s.as_bytes();
    if bytes.len() < 8 || bytes[2] != b':' || bytes[5] != b':' {
        return Err(invalid());
    }
    let hour = fixed_digits(&s[0..2], 2).ok_or_else(invalid)? as u8;
    let minute = fixed_digits(&s[3..5], 2).ok_or_else(invalid)? as u8;
    let second = fixed_digits(&s[6..8], 2).ok_or_else(invalid)? as u8;

    let nanosecond = match &s[8..] {
        "" => 0,
        fraction => {
            let digits = fraction
                .strip_prefix('.')
                .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
                .ok_or_else(invalid)?;
            // Precision beyond nanoseconds is truncated
            let mut padded: String = digits.chars().take(9).collect();
            while padded.len() < 9 {
                padded.push('0');
            }
            padded.parse::<u32>().map_err(|_| invalid())?
        }
    };

    if hour > 23 || minute > 59 || second > 59 {
        return Err(format!("time '{}' is out of range", s));
    }
    Ok(Time::new(hour, minute, second, nanosecond))
}

fn parse_offset(s: &str) -> Result<i16, String> {
    if s == "Z" || s == "z" {
        return Ok(0);
    }
    let invalid = || format!("invalid UTC offset '{}', expected Z or +HH:MM", s);
    let bytes = s.as_bytes();
    if bytes.len() != 6 || bytes[3] != b':' {
        return Err(invalid());
    }
    let sign: i16 = match bytes[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return Err(invalid()),
    };
    let hours = fixed_digits(&s[1..3], 2).ok_or_else(invalid)? as i16;
    let minutes = fixed_digits(&s[4..6], 2).ok_or_else(invalid)? as i16;
    if hours > 23 || minutes > 59 {
        return Err(format!("UTC offset '{}' is out of range", s));
    }
    Ok(sign * (hours * 60 + minutes))
}
