//! `onboard regions` command - show the built-in state and city list

use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::truncate_str;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::catalog::RegionCatalog;

#[derive(clap::Args, Debug)]
pub struct RegionsArgs {
    /// Show the cities of this state
    pub state: Option<String>,
}

pub fn run(args: RegionsArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = RegionCatalog::builtin().into_diagnostic()?;

    let output = match args.state {
        Some(ref state) => {
            if !catalog.contains_state(state) {
                return Err(miette::miette!(
                    help = "Run `onboard regions` to see the supported states",
                    "Unknown state: {}",
                    state
                ));
            }
            list_cities(&catalog, state, global.format)?
        }
        None => list_states(&catalog, global.format)?,
    };
    print!("{}", output);
    Ok(())
}

fn list_states(catalog: &RegionCatalog, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        let states: Vec<&str> = catalog.states().collect();
        return Ok(format!("{}\n", serde_json::to_string_pretty(&states).into_diagnostic()?));
    }

    let mut builder = Builder::default();
    builder.push_record(["State", "Cities", "Examples"]);
    for state in catalog.states() {
        let cities = catalog.cities(state);
        let examples = cities.iter().take(3).cloned().collect::<Vec<_>>().join(", ");
        builder.push_record([
            state.to_string(),
            cities.len().to_string(),
            truncate_str(&examples, 40),
        ]);
    }
    Ok(format!("{}\n", builder.build().with(Style::markdown())))
}

fn list_cities(catalog: &RegionCatalog, state: &str, format: OutputFormat) -> Result<String> {
    let cities = catalog.cities(state);
    if format == OutputFormat::Json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(cities).into_diagnostic()?));
    }

    let mut out = String::new();
    for city in cities {
        out.push_str(city);
        out.push('\n');
    }
    Ok(out)
}
