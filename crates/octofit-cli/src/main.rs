// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result};
use config::Config;
use octofit_api::Client;
use octofit_app::{AppState, ResourceKind, Route};
use runtime::{ApiRuntime, DemoRuntime};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `octofit --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let endpoints = config.endpoint_config();
    if options.print_endpoints {
        for kind in ResourceKind::ALL {
            println!("{:<12} {}", kind.path_segment(), endpoints.resolve(kind)?);
        }
        return Ok(());
    }

    let client = Client::new(endpoints, config.timeout()?).with_context(|| {
        format!(
            "invalid [api] config in {}; fix base_url/remote_domain/timeout values",
            options.config_path.display()
        )
    })?;
    if options.check_only {
        return Ok(());
    }

    init_logging(&config)?;
    let route = match &options.route {
        Some(path) => Route::parse(path),
        None => config.start_route(),
    };
    tracing::info!(
        route = %route.path(),
        demo = options.demo,
        remote = client.endpoints().is_remote(),
        "starting octofit"
    );

    let mut state = AppState::with_route(route);
    if options.demo {
        octofit_tui::run_app(&mut state, &mut DemoRuntime)
    } else {
        octofit_tui::run_app(&mut state, &mut ApiRuntime::new(client))
    }
}

/// The terminal belongs to the UI, so logs go to a file. `RUST_LOG` wins
/// over the configured level.
fn init_logging(config: &Config) -> Result<()> {
    let path = config.log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level()))
        .with_context(|| format!("parse log level {:?}", config.log_level()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(filter)
        .try_init()
        .context("install log subscriber")?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    print_endpoints: bool,
    route: Option<String>,
    demo: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_example: false,
        print_endpoints: false,
        route: None,
        demo: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--route" => {
                let value = iter.next().ok_or_else(|| {
                    anyhow::anyhow!("--route requires a path such as /teams")
                })?;
                options.route = Some(value.as_ref().to_owned());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--print-endpoints" => {
                options.print_endpoints = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("octofit");
    println!("  --config <path>          Use a specific config path");
    println!("  --route <path>           Open a screen, for example /teams");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --print-endpoints        Print the API URL of every screen");
    println!("  --demo                   Launch with bundled sample data");
    println!("  --check                  Validate config and endpoints");
    println!("  --help                   Show this help");
}
