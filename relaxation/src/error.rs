use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("line {line}: unknown escaping in quoted symbol: '\\{escape}'")]
    UnknownEscape { escape: char, line: usize },

    #[error("line {line}: expected '|' before end of input")]
    UnterminatedQuotedSymbol { line: usize },

    #[error("line {line}: expected '\"' before end of input")]
    UnterminatedString { line: usize },
}

#[derive(Error, Debug)]
pub enum RelaxError {
    #[error("lexing error: {0}")]
    Lex(#[from] LexError),

    #[error("expected '(' at the start of a top-level form, found '{token}'")]
    ExpectedOpenParen { token: String },

    #[error("unexpected end of input inside a term")]
    UnexpectedEof,

    #[error("unbalanced parentheses near '{token}'")]
    UnbalancedParen { token: String },

    #[error("the script contains no declaration or definition")]
    NoDeclaration,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RelaxError>;
