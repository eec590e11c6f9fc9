//! `beginning create`: resolve values, scaffold a project, run hooks.

use std::path::{Path, PathBuf};

use beginning_core::{scaffold, values, HookRunner, RawValues, ResolverSettings, Values};

use super::{parse_params, template_source};
use crate::cli_config::{expand_path, CliConfig};
use crate::error::{CtlError, CtlResult};
use crate::output;
use crate::CreateArgs;

const DEFAULT_TYPE: &str = "service";
const DEFAULT_VALUES_FILE: &str = "values.yaml";

pub(crate) fn handle_create_command(args: CreateArgs, cli_config: &CliConfig) -> CtlResult<()> {
    let template_type = args
        .template_type
        .clone()
        .or_else(|| cli_config.default_type.clone())
        .unwrap_or_else(|| DEFAULT_TYPE.to_string());

    let values = resolve_values(&args, cli_config)?;
    let source = template_source(args.templates.clone(), cli_config)?;
    let destination = output_dir(args.output.as_deref(), cli_config, &values);

    if args.dry_run {
        let plan = scaffold::plan(source.as_ref(), &template_type, &values)?;
        output::warning("Dry run, nothing will be written.");
        output::header(format!(
            "{} entries from '{}' into {}:",
            plan.entries().len(),
            plan.template_type(),
            destination.display()
        ));
        for entry in plan.entries() {
            output::plain(format!("  {}", entry.destination));
        }
        return Ok(());
    }

    let tree = scaffold::scaffold(source.as_ref(), &template_type, &values, &destination)?;
    output::success(format!(
        "Created {} ({} entries from '{template_type}')",
        tree.root.display(),
        tree.created.len()
    ));

    if args.skip_hooks || cli_config.skip_hooks {
        output::dim("  Skipping post-generation hooks.");
        return Ok(());
    }

    let report = HookRunner::standard()
        .run(&tree.root)
        .map_err(|source| CtlError::Hook {
            root: tree.root.clone(),
            source,
        })?;
    for hook in &report.executed {
        output::success(format!("Ran hook {hook}"));
    }
    for hook in &report.skipped {
        output::dim(format!("  Skipped hook {hook} (trigger not present)"));
    }

    Ok(())
}

/// Values file, then `--param` extras, then named flags on top.
fn resolve_values(args: &CreateArgs, cli_config: &CliConfig) -> CtlResult<Values> {
    let values_file = match (&args.values_file, &cli_config.values_file) {
        (Some(path), _) => {
            if !path.exists() {
                output::warning(format!(
                    "Values file {} not found, using flags only.",
                    path.display()
                ));
            }
            path.clone()
        }
        (None, Some(path)) => expand_path(path),
        (None, None) => PathBuf::from(DEFAULT_VALUES_FILE),
    };

    let explicit = RawValues {
        module_name: args.module_name.clone(),
        repo_name: args.repo_name.clone(),
        go_version: args.go_version.clone(),
        extra: parse_params(&args.param)?
            .into_iter()
            .map(|(key, value)| (key, serde_yaml::Value::String(value)))
            .collect(),
    };

    let raw = values::load(&values_file)?.merge(explicit);
    let values = values::validate(raw, &ResolverSettings::default())?;
    Ok(values)
}

fn output_dir(flag: Option<&Path>, cli_config: &CliConfig, values: &Values) -> PathBuf {
    match (flag, &cli_config.output_dir) {
        (Some(dir), _) => dir.to_path_buf(),
        (None, Some(parent)) => expand_path(parent).join(values.repo_name()),
        (None, None) => PathBuf::from(".").join(values.repo_name()),
    }
}
