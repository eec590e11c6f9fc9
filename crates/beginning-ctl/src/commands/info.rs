//! `beginning info <type>`: show the entries of a template type.

use std::path::PathBuf;

use beginning_core::scaffold::destination_file_name;

use super::{describe_source, template_source};
use crate::cli_config::CliConfig;
use crate::error::CtlResult;
use crate::output;

pub(crate) fn handle_info_command(
    template_type: &str,
    templates: Option<PathBuf>,
    cli_config: &CliConfig,
) -> CtlResult<()> {
    let label = describe_source(templates.as_ref(), cli_config);
    let source = template_source(templates, cli_config)?;
    let entries = source.walk(template_type)?;

    let rendered = entries.iter().filter(|e| e.is_template()).count();
    let files = entries.iter().filter(|e| !e.is_dir()).count();

    output::header(format!("Template: {template_type}"));
    output::label("Source", &label);
    output::label("Files", format!("{files} ({rendered} rendered)"));
    output::label("Directories", entries.len() - files);
    output::blank();

    for entry in &entries {
        if entry.is_dir() {
            output::plain(format!("  {}/", entry.path));
        } else if entry.is_template() {
            let name = destination_file_name(entry.file_name());
            output::plain(format!("  {}", entry.path));
            output::dim(format!("      → {name} (rendered)"));
        } else if entry.executable {
            output::plain(format!("  {} (executable)", entry.path));
        } else {
            output::plain(format!("  {}", entry.path));
        }
    }
    Ok(())
}
