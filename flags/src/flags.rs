use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use logging::{fatal, Level, Logger};
use relaxation::{ModEncoding, RelaxOptions};

/// Relaxes an SMT-LIB script over nonlinear integer arithmetic into nonlinear real
/// arithmetic with uninterpreted functions.
#[derive(Parser, Debug, Clone)]
#[command(name = "real-relax", version, long_about = None)]
pub struct Flags {
    /// Script to relax
    #[arg(long, alias = "input_file")]
    pub input_file: PathBuf,

    /// Where the relaxed script is written; missing directories are created
    #[arg(long, alias = "output_file")]
    pub output_file: PathBuf,

    /// Keep inequalities as they are instead of shifting bounds by one
    #[arg(long, alias = "no_relax_inequality")]
    pub no_relax_inequality: bool,

    /// Define the modulus function with a single exact case
    #[arg(long, alias = "uninterp_mod_simple", conflicts_with = "uninterp_mod_simplest")]
    pub uninterp_mod_simple: bool,

    /// Express `mod` through the fraction function, without a modulus function
    #[arg(long, alias = "uninterp_mod_simplest")]
    pub uninterp_mod_simplest: bool,

    /// Skip the zero-fraction axiom and its instances
    #[arg(long, alias = "no_frac_zero")]
    pub no_frac_zero: bool,

    /// Skip the integer approximation axiom and its instances
    #[arg(long, alias = "no_int_approx")]
    pub no_int_approx: bool,

    /// Print progress messages
    #[arg(short, long)]
    pub debug: bool,

    /// Lowest level printed with --debug
    /// # Possible values
    /// * `1` - Prints everything
    /// * `2` - Does not print completed tasks
    /// * `3` - Only warnings and errors
    /// * `4` - Only errors
    /// * `5` - Only fatal errors
    #[arg(long, alias = "debug_level", default_value_t = 1, verbatim_doc_comment)]
    pub debug_level: i32,
}

impl Flags {
    pub fn validate(&self) -> anyhow::Result<()> {
        if Level::from_number(self.debug_level).is_none() {
            bail!("the debug level must be between 1 and 5, got {}", self.debug_level);
        }
        if self.input_file == self.output_file {
            bail!(
                "the output file must differ from the input file ({})",
                self.input_file.display()
            );
        }
        Ok(())
    }

    pub fn mod_encoding(&self) -> ModEncoding {
        if self.uninterp_mod_simplest {
            ModEncoding::Simplest
        } else if self.uninterp_mod_simple {
            ModEncoding::Simple
        } else {
            ModEncoding::Full
        }
    }

    pub fn options(&self) -> RelaxOptions {
        RelaxOptions {
            relax_inequalities: !self.no_relax_inequality,
            mod_encoding: self.mod_encoding(),
            frac_zero: !self.no_frac_zero,
            int_approx: !self.no_int_approx,
        }
    }

    pub fn logger(&self) -> Logger {
        let threshold = Level::from_number(self.debug_level).unwrap_or(Level::Completion);
        Logger::new(self.debug, threshold)
    }
}

/// Parses the command line. Invalid combinations end the program.
pub fn parse_flags() -> (Flags, Logger) {
    let flags = Flags::parse();
    if let Err(e) = flags.validate() {
        fatal(&format!("{e:#}"));
    }
    let logger = flags.logger();

    logger.info(&format!("The input file is: {}", flags.input_file.display()));
    logger.info(&format!("The output file is: {}", flags.output_file.display()));
    logger.info(&format!("Options are: {:?}", flags.options()));
    logger.completed("Flag parsing");
    (flags, logger)
}
