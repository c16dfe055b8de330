use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{check::check, init::init},
    exit_status::ExitStatus,
    report,
};

/// Dispatch to the command handler and report its result.
///
/// # Returns
/// - `Ok(ExitStatus::Success)` when every selected check passed
/// - `Ok(ExitStatus::Failure)` when a check reported errors
/// - `Err` when the run could not complete (config error, unreadable i18n-src file, ...)
pub fn run(args: Arguments) -> Result<ExitStatus> {
    let verbose = args.verbose();
    match args.command {
        Some(Command::Check(cmd)) => {
            let result = check(cmd)?;
            report::print(&result, verbose);
            Ok(ExitStatus::from_error_count(result.error_count))
        }
        Some(Command::Init) => init(),
        None => anyhow::bail!("No command provided. Use --help to see available commands."),
    }
}
