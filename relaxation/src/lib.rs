//! Relaxation of nonlinear integer SMT-LIB scripts into nonlinear real arithmetic with
//! uninterpreted functions.
//!
//! Integer division and modulus become real division corrected by an uninterpreted
//! fraction function, strict and non-strict inequalities are shifted by one where the
//! polarity allows it, and axioms constraining the new symbols are instantiated for
//! every operand pair seen at top level.

mod axioms;
mod context;
mod emitter;
mod error;
mod forms;
mod lexer;
mod names;
mod options;
mod rewriter;

pub use axioms::{synthesize, Synthesized};
pub use context::{OperandPair, Polarity, RewriteContext};
pub use emitter::{emit, relax, relax_file, RelaxReport, Relaxation};
pub use error::{LexError, RelaxError, Result};
pub use forms::{rewrite_int_sort, rewrite_logic, FormBuffer};
pub use lexer::{tokenize, Lexer};
pub use names::{allocate, FreshNames};
pub use options::{ModEncoding, RelaxOptions};
pub use rewriter::TermRewriter;
