/*!
Command handlers for the CLI

- `export` — prompt for a token and range, fetch completed tasks, write the report

Handlers are small and lean on the library components: input, the
Todoist client, and the report writer.
*/

pub mod export;

pub use export::{run, run_export, run_interactive, ExportOutcome};
