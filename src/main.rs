//! medlist - terminal viewer for laboratory and medication records.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgMatches, Command};
use medlist::config::Config;
use std::fs::File;
use std::path::PathBuf;

fn cli() -> Command {
    Command::new("medlist")
        .version(medlist::VERSION)
        .about("Browse the labs and medications of a clinic data file")
        .long_about(
            "medlist shows the laboratories and medications stored in a JSON data file as \
             searchable, paginated tables with edit, delete and contact actions.",
        )
        .arg(
            Arg::new("file")
                .help("Path to the JSON data file")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("tab")
                .long("tab")
                .help("Panel shown at startup")
                .value_parser(["labs", "medications"]),
        )
        .arg(
            Arg::new("page-size")
                .long("page-size")
                .help("Rows per page (5, 10, 25 or 50)")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .help("Color theme")
                .value_parser(["default", "monochrome", "high-contrast"]),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Read settings from this TOML file instead of the default location")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Write logs to this file (RUST_LOG sets the level). Logging is off without it")
                .value_parser(value_parser!(PathBuf)),
        )
}

/// stderr shares the terminal with the alternate screen, so logs only go to a file
fn logger_builder(log_file: Option<&PathBuf>) -> Result<env_logger::Builder> {
    let mut builder = env_logger::Builder::new();
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            builder
                .filter_level(log::LevelFilter::Info)
                .parse_default_env()
                .target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    Ok(builder)
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    logger_builder(log_file)?.init();
    Ok(())
}

#[cfg(feature = "config")]
fn file_layer(path: Option<&PathBuf>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load_default()?,
    };
    Ok(config)
}

#[cfg(not(feature = "config"))]
fn file_layer(path: Option<&PathBuf>) -> Result<Config> {
    if let Some(path) = path {
        anyhow::bail!(
            "config file {} given but medlist was built without the `config` feature",
            path.display()
        );
    }
    Ok(Config::default())
}

fn cli_layer(matches: &ArgMatches) -> Config {
    Config {
        page_size: matches.get_one::<usize>("page-size").copied(),
        theme: matches.get_one::<String>("theme").cloned(),
        poll_interval_ms: None,
        default_tab: matches.get_one::<String>("tab").cloned(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();

    init_logging(matches.get_one::<PathBuf>("log-file"))?;

    let Some(file_path) = matches.get_one::<PathBuf>("file") else {
        anyhow::bail!("a data file is required");
    };

    let settings = file_layer(matches.get_one::<PathBuf>("config"))?
        .merge(cli_layer(&matches))
        .resolve()?;
    log::info!(
        "starting on {} (page size {}, tab {:?})",
        file_path.display(),
        settings.page_size,
        settings.initial_tab
    );

    use medlist::render::ui::TerminalUI;
    use medlist::Application;

    let ui_renderer = Box::new(TerminalUI::with_theme(settings.theme.clone())?);
    let mut app = Application::new(file_path.as_path(), ui_renderer, settings)?;

    app.run().await?;

    Ok(())
}
