//! Command dispatch

use std::io::{self, BufRead, Cursor, Write};
use std::path::Path;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::{EventOutcome, ReplayReport};
use crate::cli::args::{Cli, Commands, ConfigCommands, RenderFormat};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{DrawList, Event, SplitOutcome, ToTermTree};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Play { script, svg, tree }) => {
            let container = build_container(cli)?;
            cmd_play(&container, script.as_deref(), svg.as_deref(), *tree)
        }
        Some(Commands::Render {
            script,
            format,
            output,
        }) => {
            let container = build_container(cli)?;
            cmd_render(&container, script.as_deref(), *format, output.as_deref())
        }
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see `otcirc --help`".to_string(),
        )),
    }
}

fn build_container(cli: &Cli) -> CliResult<ServiceContainer> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!(?settings, "settings loaded");
    Ok(ServiceContainer::new(settings))
}

/// Event source: the script file, or stdin when absent or `-`.
fn open_events(container: &ServiceContainer, script: Option<&Path>) -> CliResult<Box<dyn BufRead>> {
    match script {
        None => Ok(Box::new(io::stdin().lock())),
        Some(path) if path == Path::new("-") => Ok(Box::new(io::stdin().lock())),
        Some(path) => {
            let content = container.replay.load_script(path)?;
            Ok(Box::new(Cursor::new(content)))
        }
    }
}

fn print_outcome(line: usize, event: &Event, outcome: &EventOutcome) {
    match outcome {
        EventOutcome::Split(SplitOutcome::Rejected) => output::failure(&format!(
            "line {line}: {event}: rejected, region already subdivided"
        )),
        EventOutcome::Split(_) | EventOutcome::Balanced { .. } => {
            output::success(&format!("line {line}: {event}: {outcome}"))
        }
        EventOutcome::Frame => output::detail(&format!("line {line}: frame")),
    }
}

fn print_summary(report: &ReplayReport, weight: usize, depth: usize) {
    output::header(&format!(
        "{} events, {} leaves, depth {}",
        report.events, weight, depth
    ));
    output::detail(&format!(
        "planted {}, split {}, rejected {}, balanced {} ({} steps)",
        report.planted, report.splits, report.rejected, report.balances, report.balance_steps
    ));
    if report.rejected > 0 {
        output::warning(&format!("{} split(s) rejected", report.rejected));
    }
}

fn write_stdout(content: &str) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(content.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|e| InfraError::output("stdout", e))?;
    Ok(())
}

#[instrument(skip(container))]
fn cmd_play(
    container: &ServiceContainer,
    script: Option<&Path>,
    svg: Option<&Path>,
    tree: bool,
) -> CliResult<()> {
    let mut session = container.session()?;
    let input = open_events(container, script)?;
    let report = container.replay.replay(&mut session, input, print_outcome)?;

    print_summary(&report, session.tree().weight(), session.tree().depth());

    if let Some(path) = svg {
        let mut canvas = container.svg_canvas();
        session.render(&mut canvas);
        container.replay.write_output(path, &canvas.to_svg())?;
        output::action("Wrote", &path.display());
    }
    if tree {
        output::info(&session.tree().to_term_tree(session.disc()));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_render(
    container: &ServiceContainer,
    script: Option<&Path>,
    format: RenderFormat,
    output: Option<&Path>,
) -> CliResult<()> {
    let mut session = container.session()?;
    let input = open_events(container, script)?;
    let report = container.replay.replay(&mut session, input, |_, _, _| {})?;
    debug!(events = report.events, rejected = report.rejected, "replayed");

    let rendered = match format {
        RenderFormat::Svg => {
            let mut canvas = container.svg_canvas();
            session.render(&mut canvas);
            canvas.to_svg()
        }
        RenderFormat::Commands => {
            let mut list = DrawList::new();
            session.render(&mut list);
            list.commands().iter().map(|c| format!("{c}\n")).collect()
        }
    };

    match output {
        Some(path) => container.replay.write_output(path, &rendered)?,
        None => write_stdout(&rendered)?,
    }
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.config.as_deref())?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => {
                    let state = if path.exists() { "" } else { " (not found)" };
                    output::action("Global", &format!("{}{}", path.display(), state));
                }
                None => output::warning("no home directory; global config disabled"),
            }
            if let Some(local) = &cli.config {
                output::action("Local", &local.display());
            }
        }
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}
