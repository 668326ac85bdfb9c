use std::collections::BTreeSet;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::error::{RelaxError, Result};

lazy_static! {
    static ref SET_LOGIC: Regex = Regex::new(r"^\(set-logic (\S*)NIA\)$").unwrap();
}

const STATUS_PREFIX: &str = "(set-info :status";

/// Name of a constant declared with sort `Int`, from its rewritten declaration.
fn int_symbol(form: &str) -> Option<&str> {
    let name = form
        .strip_prefix("(declare-const ")
        .and_then(|rest| rest.strip_suffix(" Int)"))
        .or_else(|| {
            form.strip_prefix("(declare-fun ")
                .and_then(|rest| rest.strip_suffix(" () Int)"))
        })?;
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

fn is_declaration(form: &str) -> bool {
    form.starts_with("(declare-") || form.starts_with("(define-")
}

/// Replaces every `Int` sort token with `Real`.
///
/// Only occurrences preceded by a space or `(` and followed by a space, `)` or the end
/// of the form are sort tokens in the reprinted text. Quoted symbols and string literals
/// are copied unchanged.
pub fn rewrite_int_sort(form: &str) -> String {
    let bytes = form.as_bytes();
    let mut out = String::with_capacity(form.len() + 8);
    let mut last = 0;
    let mut delimiter: Option<u8> = None;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match delimiter {
            Some(b'|') if b == b'\\' => i += 1,
            Some(d) if b == d => delimiter = None,
            Some(_) => {}
            None if b == b'|' || b == b'"' => delimiter = Some(b),
            None if is_int_token(bytes, i) => {
                out.push_str(&form[last..i]);
                out.push_str("Real");
                i += "Int".len();
                last = i;
                continue;
            }
            None => {}
        }
        i += 1;
    }
    out.push_str(&form[last..]);
    out
}

fn is_int_token(bytes: &[u8], start: usize) -> bool {
    let end = start + "Int".len();
    bytes[start..].starts_with(b"Int")
        && start > 0
        && matches!(bytes[start - 1], b' ' | b'(')
        && matches!(bytes.get(end), None | Some(b' ' | b')'))
}

/// Moves a `*NIA` logic to its real counterpart with uninterpreted functions.
pub fn rewrite_logic(form: &str) -> String {
    let Some(caps) = SET_LOGIC.captures(form) else {
        return form.to_string();
    };
    let prefix = &caps[1];
    let logic = if prefix.ends_with("UF") {
        format!("{prefix}NRA")
    } else if prefix.ends_with('_') {
        format!("{prefix}UFNRA")
    } else {
        format!("{prefix}NRA")
    };
    format!("(set-logic {logic})")
}

/// Rewritten top-level forms in input order.
#[derive(Debug, Default)]
pub struct FormBuffer {
    forms: Vec<String>,
    first_decl: Option<usize>,
    last_decl: Option<usize>,
    int_symbols: BTreeSet<String>,
    dropped: usize,
}

impl FormBuffer {
    pub fn new() -> FormBuffer {
        FormBuffer::default()
    }

    pub fn push(&mut self, form: String) {
        if form.starts_with(STATUS_PREFIX) {
            debug!("dropping {form}");
            self.dropped += 1;
            return;
        }
        if let Some(name) = int_symbol(&form) {
            debug!("integer symbol {name}");
            self.int_symbols.insert(name.to_string());
        }
        if is_declaration(&form) {
            let index = self.forms.len();
            self.first_decl.get_or_insert(index);
            self.last_decl = Some(index);
        }
        self.forms.push(rewrite_logic(&rewrite_int_sort(&form)));
    }

    pub fn forms(&self) -> &[String] {
        &self.forms
    }

    pub fn int_symbols(&self) -> &BTreeSet<String> {
        &self.int_symbols
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Indices of the first and last declaration or definition.
    pub fn declaration_span(&self) -> Result<(usize, usize)> {
        match (self.first_decl, self.last_decl) {
            (Some(first), Some(last)) => Ok((first, last)),
            _ => Err(RelaxError::NoDeclaration),
        }
    }
}
