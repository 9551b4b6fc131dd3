use std::io::{self, IsTerminal};

use clap::Parser;

use coloredlogcat::config::Config;
use coloredlogcat::driver::{self, Pipeline};
use coloredlogcat::filter::ProcessFilter;
use coloredlogcat::parse::LineParser;
use coloredlogcat::render::RenderConfig;
use coloredlogcat::resolve::CommandResolver;
use coloredlogcat::signal;
use coloredlogcat::source::{self, CommandSource, LineSource};
use coloredlogcat::theme::ColorTheme;

#[derive(Parser)]
#[command(
    name = "coloredlogcat",
    version,
    about = "Color-coded, column-aligned logcat viewer",
    long_about = "Renders `adb logcat -v time` output with colors and aligned columns.\n\
                  Reads piped stdin when present, otherwise runs the log command itself."
)]
struct Cli {
    /// Only show lines from the process running this package
    package: Option<String>,

    /// Increase diagnostic output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

/// Piped stdin wins; otherwise run the configured log command.
fn open_input(config: &Config) -> anyhow::Result<Box<dyn LineSource>> {
    if io::stdin().is_terminal() {
        log::info!("running `{}`", config.logcat_command);
        Ok(Box::new(CommandSource::spawn(&config.logcat_command)?))
    } else {
        log::info!("reading piped input");
        Ok(Box::new(source::stdin()))
    }
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let config = Config::load()?;
    let width = config.terminal_width();
    log::debug!("output width {width}");

    let parser = LineParser::new()?;
    let resolver = CommandResolver::new(config.ps_command.as_str());
    let filter = ProcessFilter::resolve(cli.package.as_deref(), &resolver);
    let theme = if config.color {
        ColorTheme::ansi256()
    } else {
        ColorTheme::plain()
    };
    if let Err(e) = signal::install() {
        log::warn!("{e:#}; Ctrl-C will terminate without cleanup");
    }

    let mut input = open_input(&config)?;
    let pipeline = Pipeline::new(parser, filter, theme, RenderConfig::new(width));
    let stdout = io::stdout();
    let summary = driver::stream(&pipeline, input.as_mut(), &mut stdout.lock());
    drop(input);

    Ok(summary.reason.exit_code())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let exit_code = run(&cli).unwrap_or_else(|e| {
        eprintln!("[coloredlogcat] error: {e:#}");
        1
    });
    std::process::exit(exit_code);
}
