//! `beginning list`: print the template types of the active source.

use std::path::PathBuf;

use super::{describe_source, template_source};
use crate::cli_config::CliConfig;
use crate::error::CtlResult;
use crate::output;

pub(crate) fn handle_list_command(
    templates: Option<PathBuf>,
    cli_config: &CliConfig,
) -> CtlResult<()> {
    let label = describe_source(templates.as_ref(), cli_config);
    let source = template_source(templates, cli_config)?;
    let types = source.list_types()?;

    if types.is_empty() {
        output::warning(format!("No template types found in {label}."));
        return Ok(());
    }

    output::header(format!("Template types ({label}):"));
    for name in &types {
        output::item(name);
    }
    Ok(())
}
