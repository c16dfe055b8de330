//! AddKey action.
//!
//! Adds keys used in source files but missing from the i18n-src file, asking
//! for each value on the terminal. Used by `check --fix` for nonexistent-keys.
//!
//! Every accepted value is written immediately, so cancelling keeps the keys
//! added so far. End of input cancels; so does Ctrl+C, which reports the
//! progress before exiting.

use std::{
    io::{self, BufRead, Write},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use anyhow::Result;
use colored::Colorize;

use super::operation::Operation;
use super::traits::ActionStats;
use crate::{
    cli::report::SUCCESS_MARK, core::CheckContext, issues::NonexistentKeyIssue, utils::plural,
};

pub struct AddKey;

impl AddKey {
    /// Prompt on the terminal for the value of every nonexistent key.
    pub fn run_interactive(issues: &[NonexistentKeyIssue], ctx: &CheckContext) -> Result<ActionStats> {
        if issues.is_empty() {
            return Ok(ActionStats::default());
        }
        let added = Arc::new(AtomicUsize::new(0));
        install_interrupt_handler(issues.len(), Arc::clone(&added));

        let stdin = io::stdin();
        let stdout = io::stdout();
        Self::run_with(issues, ctx, &mut stdin.lock(), &mut stdout.lock(), &added)
    }

    /// Prompt on `output` and read values from `input`.
    ///
    /// An empty answer skips the key. `added` counts the keys written so far.
    pub fn run_with<R: BufRead, W: Write>(
        issues: &[NonexistentKeyIssue],
        ctx: &CheckContext,
        input: &mut R,
        output: &mut W,
        added: &AtomicUsize,
    ) -> Result<ActionStats> {
        let mut stats = ActionStats::default();
        if issues.is_empty() {
            return Ok(stats);
        }

        writeln!(
            output,
            "{} {} nonexistent {}: enter a value to add it to {}, or press Enter to skip",
            "note:".bold().cyan(),
            issues.len(),
            plural(issues.len(), "key", "keys"),
            ctx.source.file_path
        )?;

        let mut cancelled = false;
        for issue in issues {
            let key = &issue.context.key;
            writeln!(output, "\n{} {}", "key:".cyan(), key)?;
            writeln!(output, "{} {}", "used in:".cyan(), issue.usages.join(", "))?;
            write!(output, "{} ", format!("value for '{}':", key).green())?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                cancelled = true;
                break;
            }
            stats.processed += 1;

            let value = line.trim();
            if value.is_empty() {
                stats.skipped += 1;
                writeln!(output, "skipped '{}'", key)?;
                continue;
            }

            let op = Operation::AddJsonValue {
                file_path: ctx.source.path.clone(),
                key: key.clone(),
                value: value.to_string(),
            };
            let applied = op.execute()?;
            if applied > 0 {
                stats.changes_applied += applied;
                stats.files_modified = 1;
                added.fetch_add(1, Ordering::SeqCst);
                writeln!(output, "{} added '{}': '{}'", SUCCESS_MARK.green(), key, value)?;
            }
        }

        let count = added.load(Ordering::SeqCst);
        if cancelled {
            writeln!(
                output,
                "\n{} cancelled: added {} of {} {}",
                "warning:".bold().yellow(),
                count,
                issues.len(),
                plural(issues.len(), "key", "keys")
            )?;
        } else {
            writeln!(output)?;
        }
        Ok(stats)
    }
}

/// On Ctrl+C, report how many keys were added and exit with a failure status.
fn install_interrupt_handler(total: usize, added: Arc<AtomicUsize>) {
    let result = ctrlc::set_handler(move || {
        let count = added.load(Ordering::SeqCst);
        eprintln!(
            "\n{} cancelled by user: added {} of {} {}",
            "warning:".bold().yellow(),
            count,
            total,
            plural(total, "key", "keys")
        );
        std::process::exit(1);
    });
    if let Err(e) = result {
        tracing::warn!("cannot install Ctrl+C handler: {}", e);
    }
}
