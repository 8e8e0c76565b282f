//! Map command - show the persisted asset map

use crate::bust::{AssetMap, LocalFs, MapStore};
use crate::cli::args::{MapArgs, OutputFormat};
use crate::config::Config;
use crate::error::CachebustResult;
use crate::ui::{self, UiContext};
use console::style;
use std::path::Path;

/// Execute the map command
pub async fn execute(args: MapArgs, config: &Config, project_root: &Path) -> CachebustResult<()> {
    let ctx = UiContext::detect();

    let base_dir = project_root.join(args.base_dir.as_ref().unwrap_or(&config.options.base_dir));
    let path = base_dir.join(&config.options.json_output_filename);

    let fs = LocalFs;
    let map = MapStore::new(&fs, path).load()?;

    if map.is_empty() {
        match args.format {
            OutputFormat::Json => println!("{{}}"),
            OutputFormat::Plain => {}
            OutputFormat::Table => ui::step_info(&ctx, "Asset map is empty"),
        }
        return Ok(());
    }

    print_map(&ctx, &map, args.format)
}

/// Print an asset map in the requested format
pub(crate) fn print_map(ctx: &UiContext, map: &AssetMap, format: OutputFormat) -> CachebustResult<()> {
    match format {
        OutputFormat::Table => print_table(ctx, map),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(map)?),
        OutputFormat::Plain => {
            for (original, busted) in map.iter() {
                println!("{} -> {}", original, busted);
            }
        }
    }
    Ok(())
}

/// Two-column table of originals and busted references
pub(crate) fn print_table(ctx: &UiContext, map: &AssetMap) {
    ui::intro(ctx, "Asset map");

    let width = map
        .keys()
        .map(|k| k.chars().count())
        .max()
        .unwrap_or(0)
        .max("ORIGINAL".len());

    println!(
        "{:<width$}  {}",
        style("ORIGINAL").bold(),
        style("BUSTED").bold(),
        width = width
    );
    println!("{}", "-".repeat(width * 2 + 2));

    for (original, busted) in map.iter() {
        println!("{:<width$}  {}", original, style(busted).cyan(), width = width);
    }

    println!();
    println!("{} asset(s)", map.len());
}
