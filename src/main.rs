use anyhow::Context;
use flags::{parse_flags, Flags};
use log::debug;
use logging::{fatal, Logger};

fn run(flags: &Flags, logger: &Logger) -> anyhow::Result<()> {
    let options = flags.options();
    if flags.output_file.exists() {
        logger.warn(&format!("overwriting {}", flags.output_file.display()));
    }

    let report = relaxation::relax_file(&flags.input_file, &flags.output_file, &options)
        .with_context(|| format!("failed to relax {}", flags.input_file.display()))?;

    debug!("fresh names: {:?}", report.names);
    logger.info(&format!("Fraction function is {}", report.names.frac));
    logger.completed(&format!("{} written: {report}", flags.output_file.display()));
    Ok(())
}

fn main() {
    env_logger::init();
    let (flags, logger) = parse_flags();
    if let Err(e) = run(&flags, &logger) {
        fatal(&format!("{e:#}"));
    }
}
