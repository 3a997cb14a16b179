use anyhow::{Context, Result};
use bom_cli::input::load_records;
use bom_cli::types::{GroupRow, build_rows};
use bom_core::{collapse_refs, expand_refs, organize_parts};
use bom_model::OrganizeOptions;
use tracing::{debug, info_span};

use crate::cli::{CollapseArgs, ExpandArgs, OrganizeArgs, OutputFormatArg};
use crate::summary::{print_groups, print_list};

pub fn run_organize(args: &OrganizeArgs) -> Result<()> {
    let span = info_span!("bom", input = %args.input.display());
    let _guard = span.enter();

    let options = organize_options(args)?;
    let records = load_records(&args.input)?;
    let groups = organize_parts(&records, &options).context("organize parts")?;
    let rows: Vec<GroupRow> = build_rows(groups).context("collapse designators")?;
    match args.format {
        OutputFormatArg::Table => print_groups(&rows),
        OutputFormatArg::Json => {
            let json = serde_json::to_string_pretty(&rows).context("serialize groups")?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Config file options with the command-line overrides applied.
fn organize_options(args: &OrganizeArgs) -> Result<OrganizeOptions> {
    let mut options = match &args.config {
        Some(path) => OrganizeOptions::load(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => OrganizeOptions::default(),
    };
    if let Some(variant) = &args.variant {
        options.variant = variant.clone();
    }
    for field in &args.merge {
        if !options.merge_fields.contains(field) {
            options.merge_fields.push(field.clone());
        }
    }
    if let Some(bom_order) = &args.bom_order {
        options.bom_order = bom_order.clone();
    }
    debug!(?options, "organize options");
    Ok(options)
}

pub fn run_expand(args: &ExpandArgs) -> Result<()> {
    let refs = expand_refs(&args.text).context("expand designators")?;
    print_list("Designator", &refs);
    Ok(())
}

pub fn run_collapse(args: &CollapseArgs) -> Result<()> {
    let collapsed = collapse_refs(&args.refs).context("collapse designators")?;
    println!("{collapsed}");
    Ok(())
}
