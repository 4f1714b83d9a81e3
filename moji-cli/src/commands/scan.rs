//! Scan command implementation.
//!
//! Starts one lookup service for the whole invocation and streams every
//! input through a single scanner to stdout, so the memo cache is shared
//! across all inputs.

use std::io::{self, ErrorKind, Write};
use std::path::PathBuf;
use std::time::Instant;

use moji_lookup::{spawn, AnnotationResolver, Client, LookupContext};
use moji_scan::{ScanConfig, ScanError, ScanSummary, Scanner};

use crate::commands::common::{error_messages, open_input, STDIN_MARKER};
use crate::commands::fetch::ensure_table;
use crate::commands::traits::Command;
use crate::config::TableConfig;
use crate::error::{MojiError, Result};

/// Arguments for the scan command.
#[derive(Debug, Clone)]
pub struct ScanArgs {
    /// Inputs in order; empty means stdin.
    pub inputs: Vec<PathBuf>,
    /// Token delimiter.
    pub delimiter: char,
    /// Provision the table when it is missing.
    pub fetch: bool,
    /// Table settings, with any CLI override already applied.
    pub table: TableConfig,
}

impl Default for ScanArgs {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            delimiter: moji_scan::DEFAULT_DELIMITER as char,
            fetch: true,
            table: TableConfig::default(),
        }
    }
}

/// Scan command handler.
pub struct ScanCommand {
    args: ScanArgs,
}

impl Command for ScanCommand {
    type Args = ScanArgs;
    type Output = ScanSummary;

    fn new(args: Self::Args) -> Self {
        Self { args }
    }

    fn execute(&self) -> Result<ScanSummary> {
        let start_time = Instant::now();
        let config = ScanConfig::with_delimiter(self.args.delimiter)
            .map_err(|e| MojiError::Validation(e.to_string()))?;
        let table = self.prepare_table()?;

        let (mut client, handle) = spawn(AnnotationResolver::new())?;
        let result = self.scan_inputs(&mut client, LookupContext::new(table), config);

        // Closing the client ends the service loop.
        drop(client);
        let stats = handle.join();

        let summary = result?;
        let stats = stats?;
        tracing::debug!(
            "scanned {} bytes, {} tokens ({} abandoned, {} unterminated) in {:.2}s",
            summary.bytes_read,
            summary.tokens,
            summary.abandoned,
            summary.unterminated,
            start_time.elapsed().as_secs_f64()
        );
        tracing::debug!(
            "lookup cache: {} hits, {} misses",
            stats.hits,
            stats.misses
        );
        Ok(summary)
    }

    fn name() -> &'static str {
        "scan"
    }
}

impl ScanCommand {
    /// Resolves the table path, provisioning it first if allowed.
    fn prepare_table(&self) -> Result<PathBuf> {
        let path = self.args.table.resolve_path()?;
        if path.is_file() {
            return Ok(path);
        }
        if !self.args.fetch {
            return Err(MojiError::Provision(format!(
                "{} {}; {}",
                error_messages::TABLE_NOT_FOUND,
                path.display(),
                error_messages::FETCH_HINT
            )));
        }

        ensure_table(&self.args.table, &path, false)?;
        Ok(path)
    }

    fn scan_inputs(
        &self,
        client: &mut Client,
        context: LookupContext,
        config: ScanConfig,
    ) -> Result<ScanSummary> {
        let mut scanner = Scanner::new(client, context, config)?;
        let stdout = io::stdout();
        let mut out = stdout.lock();

        let stdin = [PathBuf::from(STDIN_MARKER)];
        let inputs = if self.args.inputs.is_empty() {
            &stdin[..]
        } else {
            &self.args.inputs[..]
        };

        let mut total = ScanSummary::default();
        for input in inputs {
            tracing::debug!("scanning {}", input.display());
            let reader = open_input(input)?;
            match scanner.scan(reader, &mut out) {
                Ok(summary) => {
                    total.bytes_read += summary.bytes_read;
                    total.tokens += summary.tokens;
                    total.abandoned += summary.abandoned;
                    total.unterminated += summary.unterminated;
                }
                Err(ScanError::Io(e)) if e.kind() == ErrorKind::BrokenPipe => {
                    tracing::debug!("output closed, stopping");
                    return Ok(total);
                }
                Err(e) => return Err(e.into()),
            }
        }

        out.flush()?;
        Ok(total)
    }
}
