use std::fmt;
use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::axioms::{synthesize, Synthesized};
use crate::context::RewriteContext;
use crate::error::Result;
use crate::forms::FormBuffer;
use crate::lexer::Lexer;
use crate::names::FreshNames;
use crate::options::RelaxOptions;
use crate::rewriter::TermRewriter;

/// Summary of one relaxation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaxReport {
    pub forms: usize,
    pub dropped: usize,
    pub div_pairs: usize,
    pub mul_pairs: usize,
    pub int_symbols: usize,
    pub uses_abs: bool,
    pub names: FreshNames,
}

impl fmt::Display for RelaxReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} forms ({} dropped), {} division pairs, {} multiplication pairs, {} integer symbols",
            self.forms, self.dropped, self.div_pairs, self.mul_pairs, self.int_symbols
        )?;
        if self.uses_abs {
            write!(f, ", abs")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Relaxation {
    pub script: String,
    pub report: RelaxReport,
}

/// Writes the forms, with the prelude before form `first` and the instances after
/// form `last`.
pub fn emit(forms: &[String], first: usize, last: usize, synthesized: &Synthesized) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for (i, form) in forms.iter().enumerate() {
        if i == first {
            lines.extend(synthesized.prelude.iter().map(String::as_str));
        }
        lines.push(form);
        if i == last {
            lines.extend(synthesized.instances.iter().map(String::as_str));
        }
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Relaxes a whole NIA script into NRA with uninterpreted functions.
///
/// Nothing is produced unless every form rewrites cleanly.
pub fn relax(text: &str, options: &RelaxOptions) -> Result<Relaxation> {
    let names = FreshNames::allocate(text);
    debug!("fresh names: {:?}", names.all());
    let mut ctx = RewriteContext::new(*options, names);
    let mut buffer = FormBuffer::new();
    {
        let mut rewriter = TermRewriter::new(Lexer::from_text(text), &mut ctx);
        while let Some(form) = rewriter.next_form()? {
            buffer.push(form);
        }
    }

    let (first, last) = buffer.declaration_span()?;
    debug!("declarations span forms {first}..={last}");
    let synthesized = synthesize(&ctx, buffer.int_symbols());
    let script = emit(buffer.forms(), first, last, &synthesized);

    let report = RelaxReport {
        forms: buffer.forms().len(),
        dropped: buffer.dropped(),
        div_pairs: ctx.div_pairs.len(),
        mul_pairs: ctx.mul_pairs.len(),
        int_symbols: buffer.int_symbols().len(),
        uses_abs: ctx.uses_abs,
        names: ctx.names,
    };
    info!("relaxed {report}");
    Ok(Relaxation { script, report })
}

/// Reads `input`, relaxes it and writes the result to `output`, creating missing
/// parent directories.
pub fn relax_file(input: &Path, output: &Path, options: &RelaxOptions) -> Result<RelaxReport> {
    let text = fs::read_to_string(input)?;
    let relaxation = relax(&text, options)?;
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(output, &relaxation.script)?;
    Ok(relaxation.report)
}
