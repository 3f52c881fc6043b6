use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use scav_locations::Dataset;
use scav_replacer::logging::init_tracing;
use scav_replacer::{ReplacerState, ScavReplacer, MOD_NAME, MOD_VERSION};

fn mod_root_arg() -> Arg {
    Arg::new("mod-root")
        .long("mod-root")
        .default_value(".")
        .value_parser(value_parser!(PathBuf))
        .help("Directory holding config/config.jsonc and _debug/")
}

fn cli() -> Command {
    Command::new("scav-replacer")
        .version(MOD_VERSION)
        .about("Replace spawn types in a location database and bot payloads")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Raise log level (-v debug, -vv trace)"),
        )
        .subcommand(
            Command::new("patch")
                .about("Patch a location database file")
                .arg(
                    Arg::new("locations")
                        .long("locations")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Location database JSON file"),
                )
                .arg(mod_root_arg())
                .arg(
                    Arg::new("map")
                        .long("map")
                        .help("Patch only this map"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .value_parser(value_parser!(PathBuf))
                        .help("Write the patched database here"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the summary as JSON"),
                ),
        )
        .subcommand(
            Command::new("payload")
                .about("Patch a bot-generation payload read from a file or stdin")
                .arg(mod_root_arg())
                .arg(
                    Arg::new("input")
                        .long("input")
                        .value_parser(value_parser!(PathBuf))
                        .help("Payload file (stdin when absent)"),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Print the effective configuration")
                .arg(mod_root_arg()),
        )
}

fn mod_root(args: &ArgMatches) -> PathBuf {
    args.get_one::<PathBuf>("mod-root")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."))
}

fn run_patch(args: &ArgMatches) -> Result<()> {
    let Some(locations) = args.get_one::<PathBuf>("locations") else {
        anyhow::bail!("--locations is required");
    };
    let state = ReplacerState::load(&mod_root(args));
    let dataset = Dataset::from_path(locations)
        .with_context(|| format!("loading {}", locations.display()))?;

    let map = args.get_one::<String>("map").map(String::as_str);
    let result = ScavReplacer::new(state, dataset.clone()).on_load_for(map);

    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("TotalReplaced={}", result.total_replaced);
        for (map, replaced) in result.maps_ignoring_case() {
            println!("{map}: replaced {replaced}");
        }
    }

    if let Some(output) = args.get_one::<PathBuf>("output") {
        dataset
            .write_to_path(output)
            .with_context(|| format!("writing {}", output.display()))?;
    }
    Ok(())
}

fn run_payload(args: &ArgMatches) -> Result<()> {
    let mut payload = match args.get_one::<PathBuf>("input") {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).context("reading stdin")?;
            text
        }
    };

    let replacer = ScavReplacer::new(ReplacerState::load(&mod_root(args)), Dataset::from_json(&serde_json::json!({}))?);
    let replaced = replacer.on_bot_generate(&mut payload);
    tracing::info!("{} values replaced", replaced);
    println!("{payload}");
    Ok(())
}

fn run_config(args: &ArgMatches) -> Result<()> {
    let state = ReplacerState::load(&mod_root(args));
    println!("{}", serde_json::to_string_pretty(&state.snapshot().config)?);
    Ok(())
}

fn main() {
    let matches = cli().get_matches();
    init_tracing(matches.get_count("verbose"));
    tracing::debug!("{} {}", MOD_NAME, MOD_VERSION);

    let outcome = match matches.subcommand() {
        Some(("patch", args)) => run_patch(args),
        Some(("payload", args)) => run_payload(args),
        Some(("config", args)) => run_config(args),
        _ => Ok(()),
    };

    if let Err(err) = outcome {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn patch_requires_locations() {
        assert!(cli().try_get_matches_from(["scav-replacer", "patch"]).is_err());
        let matches = cli()
            .try_get_matches_from(["scav-replacer", "-vv", "patch", "--locations", "l.json", "--json"])
            .unwrap();
        assert_eq!(matches.get_count("verbose"), 2);
        let (_, args) = matches.subcommand().unwrap();
        assert!(args.get_flag("json"));
        assert_eq!(mod_root(args), PathBuf::from("."));
    }
}
