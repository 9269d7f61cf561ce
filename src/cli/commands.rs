//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::OrgChartSession;
use crate::cli::args::{Cli, Commands, ConfigCommands, FilterArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::render::render_forest;
use crate::config::{global_config_path, Settings};
use crate::domain::FilterCriteria;
use crate::infrastructure::di::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see --help".to_string(),
        ));
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Tree { rows, filters } => cmd_tree(&container, rows, filters),
        Commands::Roots { rows } => cmd_roots(&container, rows),
        Commands::Show { rows, id } => cmd_show(&container, rows, id),
        Commands::Options { rows, company } => cmd_options(&container, rows, company.clone()),
        Commands::Config { command } => cmd_config(&container, command),
        Commands::Completion { .. } => Ok(()),
    }
}

fn load_session(container: &ServiceContainer, rows: &Path) -> CliResult<OrgChartSession> {
    let source = container.json_source(rows);
    Ok(container.load(&source)?)
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, rows: &Path, filters: &FilterArgs) -> CliResult<()> {
    let mut session = load_session(container, rows)?;
    session.set_filters(FilterCriteria {
        company: filters.company.clone(),
        team: filters.team.clone(),
        search_text: filters.search.clone(),
    });
    if filters.team.is_some() && session.filters().team.is_none() {
        output::warning("team filter ignored, the selected company has no such team");
    }

    let Some(forest) = session.forest() else {
        return Ok(());
    };
    let roots = session.filtered_roots();
    debug!(roots = roots.len(), "rendering");

    if roots.is_empty() {
        output::warning("no positions match the filters");
        return Ok(());
    }

    let company_filtered = session.filters().active_company().is_some();
    for tree in render_forest(forest, &roots, company_filtered) {
        output::info(&tree);
    }
    output::detail(&format!(
        "{} positions, {} roots, depth {}",
        forest.len(),
        forest.roots().len(),
        forest.depth()
    ));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_roots(container: &ServiceContainer, rows: &Path) -> CliResult<()> {
    let session = load_session(container, rows)?;
    let Some(forest) = session.forest() else {
        return Ok(());
    };
    output::header(&format!("{} roots", forest.roots().len()));
    for root in forest.roots() {
        output::detail(&format!("{}  {}", root.id, root));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_show(container: &ServiceContainer, rows: &Path, id: &str) -> CliResult<()> {
    let session = load_session(container, rows)?;
    output::info(&session.detail(id)?);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_options(
    container: &ServiceContainer,
    rows: &Path,
    company: Option<String>,
) -> CliResult<()> {
    let mut session = load_session(container, rows)?;
    session.set_company(company);

    output::header("Empresas");
    for company in session.company_options() {
        output::detail(&company);
    }
    output::header("Times");
    for team in session.team_options() {
        output::detail(&team);
    }
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&container.settings.to_toml()?),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no config directory available on this platform"),
        },
    }
    Ok(())
}
