//! Tokenizer for SMT-LIB scripts.
//!
//! Tokens are plain strings: `(`, `)`, a quoted symbol `|...|`, a string literal `"..."`
//! or a bare atom. Callers classify them by comparing the text.

use std::iter::Peekable;

use crate::error::LexError;

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn is_special(c: char) -> bool {
    is_space(c) || matches!(c, '(' | ')' | '|' | '"' | ';')
}

/// Lazy token stream over a character source.
///
/// After the first error the stream is exhausted.
pub struct Lexer<I: Iterator<Item = char>> {
    chars: Peekable<I>,
    line: usize,
    failed: bool,
}

impl<'a> Lexer<std::str::Chars<'a>> {
    pub fn from_text(text: &'a str) -> Self {
        Lexer::new(text.chars())
    }
}

impl<I: Iterator<Item = char>> Lexer<I> {
    pub fn new(chars: I) -> Self {
        Lexer {
            chars: chars.peekable(),
            line: 1,
            failed: false,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    // The opening '|' has been consumed. Escapes are kept verbatim so the token
    // can be written back out unchanged.
    fn quoted_symbol(&mut self) -> Result<String, LexError> {
        let mut s = String::from("|");
        loop {
            match self.bump() {
                None => return Err(LexError::UnterminatedQuotedSymbol { line: self.line }),
                Some('|') => {
                    s.push('|');
                    return Ok(s);
                }
                Some('\\') => match self.bump() {
                    Some(c @ ('|' | '\\')) => {
                        s.push('\\');
                        s.push(c);
                    }
                    Some(escape) => {
                        return Err(LexError::UnknownEscape {
                            escape,
                            line: self.line,
                        })
                    }
                    None => return Err(LexError::UnterminatedQuotedSymbol { line: self.line }),
                },
                Some(c) => s.push(c),
            }
        }
    }

    // The opening '"' has been consumed. A doubled quote is an escaped quote, so the
    // literal ends at the first other character after an odd run of quotes.
    fn string_literal(&mut self) -> Result<String, LexError> {
        let mut s = String::from("\"");
        let mut quotes = 0usize;
        loop {
            match self.chars.peek().copied() {
                None if quotes % 2 == 1 => return Ok(s),
                None => return Err(LexError::UnterminatedString { line: self.line }),
                Some(c) if c != '"' && quotes % 2 == 1 => return Ok(s),
                Some(c) => {
                    self.bump();
                    s.push(c);
                    if c == '"' {
                        quotes += 1;
                    }
                }
            }
        }
    }

    fn atom(&mut self) -> String {
        let mut s = String::new();
        while let Some(&c) = self.chars.peek() {
            if is_special(c) {
                break;
            }
            s.push(c);
            self.bump();
        }
        s
    }
}

impl<I: Iterator<Item = char>> Iterator for Lexer<I> {
    type Item = Result<String, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let c = *self.chars.peek()?;
            let token = match c {
                c if is_space(c) => {
                    self.bump();
                    continue;
                }
                ';' => {
                    while let Some(c) = self.bump() {
                        if c == '\n' {
                            break;
                        }
                    }
                    continue;
                }
                '(' | ')' => {
                    self.bump();
                    Ok(c.to_string())
                }
                '|' => {
                    self.bump();
                    self.quoted_symbol()
                }
                '"' => {
                    self.bump();
                    self.string_literal()
                }
                _ => Ok(self.atom()),
            };
            self.failed = token.is_err();
            return Some(token);
        }
    }
}

/// Collects every token of `text`.
pub fn tokenize(text: &str) -> Result<Vec<String>, LexError> {
    Lexer::from_text(text).collect()
}
