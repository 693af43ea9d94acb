//! Handler for the `export` command.

use std::fs;

use tracing::info;

use crate::adapter::inbound::cli::command::ExportArgs;
use crate::adapter::inbound::cli::{output, results};
use crate::application::report;
use crate::error::Result;
use crate::port::RunStore;

/// Execute `export`: write the document to `--output`, or stdout.
pub async fn execute<S: RunStore>(store: &S, args: &ExportArgs) -> Result<()> {
    let run = results::resolve(store, args.run).await?;
    let document = report::render(&run, args.format)?;

    let Some(path) = &args.output else {
        output::raw(&document);
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &document)?;
    info!(run_id = %run.id, path = %path.display(), format = %args.format, "Exported run");

    output::success(&format!(
        "Exported run {} as {} to {}",
        run.id,
        args.format,
        path.display()
    ));
    Ok(())
}
