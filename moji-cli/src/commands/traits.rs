//! Command trait for the moji CLI.
//!
//! Every subcommand implements [`Command`] so `main` can run it the same
//! way: build it from its arguments, enter a span named after it, execute.

use crate::error::Result;

/// Standard command trait that all moji commands implement.
pub trait Command {
    /// The arguments type for this command.
    type Args;

    /// The output type returned by this command.
    type Output;

    /// Create a new command instance with the given arguments.
    fn new(args: Self::Args) -> Self;

    /// Execute the command.
    fn execute(&self) -> Result<Self::Output>;

    /// Get the command name.
    fn name() -> &'static str;
}

/// Builds and executes `C` inside a tracing span named after it.
pub fn dispatch<C: Command>(args: C::Args) -> Result<C::Output> {
    let span = tracing::info_span!("command", name = C::name());
    let _guard = span.enter();
    C::new(args).execute()
}
