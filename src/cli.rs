use crate::assets::Filter;
use crate::config::Config;
use crate::download::{Fetched, direct, github};
use crate::install::{SaveOptions, save_binary};
use crate::models::{Args, Asset, Commands, FilterOptions, OutputArgs, SelectionArgs};
use anyhow::Result;
use clap::Parser;

/// Main CLI entry point
pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    let config = Config::load(args.config.as_deref())?;

    match args.command {
        Commands::Github {
            repo,
            tag,
            selection,
            output,
        } => {
            let mut filter = build_filter(&config, &selection);
            let fetched = github::fetch(&mut filter, &repo, tag.as_deref(), &config.user_agent())?;
            finish(&mut filter, &config, &output, &fetched)?;
        }
        Commands::Fetch {
            url,
            version,
            selection,
            output,
        } => {
            let mut filter = build_filter(&config, &selection);
            let fetched = direct::fetch(&mut filter, &url, version.as_deref())?;
            finish(&mut filter, &config, &output, &fetched)?;
        }
        Commands::Pick {
            names,
            context,
            all,
        } => {
            let mut filter = Filter::for_runtime(FilterOptions {
                skip_scoring: all || config.all,
                ..Default::default()
            });
            let assets: Vec<Asset> = names.iter().map(|n| Asset::new(n.as_str(), "")).collect();
            let picked = filter.filter_assets(&context, &assets)?;
            println!("{} (score: {})", picked.name, picked.score);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn build_filter(config: &Config, selection: &SelectionArgs) -> Filter {
    let opts = FilterOptions {
        skip_scoring: selection.all || config.all,
        skip_path_check: selection.skip_path_check,
        package_path: selection.package_path.clone().unwrap_or_default(),
    };
    Filter::for_runtime(opts).with_user_agent(config.user_agent())
}

fn finish(filter: &mut Filter, config: &Config, output: &OutputArgs, fetched: &Fetched) -> Result<()> {
    let opts = SaveOptions {
        dir: config.output_dir(output.output.as_deref()),
        pick_name: output.pick_name,
        force: output.force,
    };
    let path = save_binary(filter.selector(), fetched, &opts)?;

    println!("Saved as: {}", path.display());
    if !fetched.version.is_empty() {
        println!("Version: {}", fetched.version);
    }
    println!("SHA-256: {}", fetched.sha256);
    if !fetched.file.package_path.is_empty() {
        println!("Package path: {}", fetched.file.package_path);
    }
    Ok(())
}
