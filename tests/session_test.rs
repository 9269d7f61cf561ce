//! Tests for OrgChartSession: ingestion, filter state, options and detail

use std::path::PathBuf;

use orgforest::application::{ApplicationError, OrgChartSession};
use orgforest::config::Settings;
use orgforest::domain::{FilterCriteria, Row, DEFAULT_TEAM};
use orgforest::infrastructure::di::ServiceContainer;
use orgforest::infrastructure::traits::{InMemoryRowSource, RowSource};
use orgforest::util::testing::init_test_setup;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/resources/org")
        .join(name)
}

fn loaded_session() -> OrgChartSession {
    init_test_setup();
    let container = ServiceContainer::new(Settings::default());
    let source = container.json_source(&fixture("acme.json"));
    container.load(&source).expect("load fixture")
}

fn root_ids(session: &OrgChartSession) -> Vec<String> {
    session
        .filtered_roots()
        .iter()
        .map(|b| b.id.clone())
        .collect()
}

// ============================================================
// Ingestion
// ============================================================

#[test]
fn given_fixture_sheet_when_loading_then_builds_expected_forest() {
    // Act
    let session = loaded_session();

    // Assert
    let forest = session.forest().unwrap();
    assert_eq!(forest.len(), 8);
    let roots: Vec<&str> = forest.roots().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(roots, vec!["Carla-Dias-0", "Carla-Dias-4", "Fabio-6"]);
    assert_eq!(forest.depth(), 3);
}

#[test]
fn given_fixture_sheet_when_loading_then_resolves_same_name_managers_by_company() {
    // Act
    let session = loaded_session();

    // Assert
    let forest = session.forest().unwrap();
    let parent = |id: &str| forest.parent(id).map(|p| p.id.clone());
    assert_eq!(parent("Eva-Rocha-5"), Some("Carla-Dias-4".to_string()));
    // Gamma has no Carla Dias; first one in the sheet wins
    assert_eq!(parent("Gil-8"), Some("Carla-Dias-0".to_string()));
    assert_eq!(parent("Fabio-6"), None);
}

#[test]
fn given_fixture_sheet_when_loading_then_blank_team_and_numeric_title_are_handled() {
    // Act
    let session = loaded_session();

    // Assert
    let forest = session.forest().unwrap();
    assert_eq!(forest.get("Eva-Rocha-5").unwrap().team, DEFAULT_TEAM);
    assert_eq!(forest.get("Gil-8").unwrap().title, "42");
    assert_eq!(forest.get("Carla-Dias-4").unwrap().manager_name, None);
}

#[test]
fn given_invalid_rows_when_ingesting_then_previous_state_is_kept() {
    // Arrange
    let mut session = loaded_session();
    session.set_search(Some("dados".into()));

    // Act
    let result = session.ingest(vec![Row::new().with("Nome", "Ana")]);

    // Assert
    assert!(matches!(result, Err(ApplicationError::Domain(_))));
    assert_eq!(session.forest().unwrap().len(), 8);
    assert_eq!(session.filters().active_search(), Some("dados"));
}

#[test]
fn given_loaded_session_when_ingesting_new_rows_then_replaces_forest_and_clears_filters() {
    // Arrange
    let mut session = loaded_session();
    session.set_company(Some("Acme".into()));
    let rows = vec![Row::new()
        .with("Empresa", "Nova")
        .with("G. Imediato", "")
        .with("Colaborador", "Zoe")
        .with("Cargo", "CEO")];

    // Act
    let forest = session.ingest(rows).unwrap();

    // Assert
    assert_eq!(forest.len(), 1);
    assert!(session.filters().is_empty());
    assert_eq!(root_ids(&session), vec!["Zoe-0"]);
}

#[test]
fn given_loaded_session_when_resetting_then_everything_is_cleared() {
    // Arrange
    let mut session = loaded_session();
    session.set_team(Some("Dados".into()));

    // Act
    session.reset();

    // Assert
    assert!(!session.is_loaded());
    assert!(session.filters().is_empty());
    assert!(session.filtered_roots().is_empty());
    assert!(session.company_options().is_empty());
    assert!(matches!(
        session.detail("Carla-Dias-0"),
        Err(ApplicationError::NotLoaded)
    ));
}

#[test]
fn given_in_memory_source_when_loading_then_behaves_like_file_source() {
    // Arrange
    init_test_setup();
    let rows = vec![Row::new()
        .with("Empresa", "Acme")
        .with("G. Imediato", "")
        .with("Colaborador", "Ana")
        .with("Cargo", "CEO")];
    let source = InMemoryRowSource::new(rows.clone());
    let container = ServiceContainer::new(Settings::default());

    // Act
    let session = container.load(&source).unwrap();

    // Assert
    assert_eq!(source.read_rows().unwrap(), rows);
    assert_eq!(root_ids(&session), vec!["Ana-0"]);
}

// ============================================================
// Filters and options
// ============================================================

#[test]
fn given_search_when_projecting_then_keeps_ancestors() {
    // Arrange
    let mut session = loaded_session();

    // Act
    session.set_search(Some("dados".into()));

    // Assert
    let roots = session.filtered_roots();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].ids(), vec!["Carla-Dias-0", "Bruno-Lima-1", "Ana-Souza-2"]);
}

#[test]
fn given_no_filters_when_projecting_then_returns_whole_outline() {
    let session = loaded_session();

    let roots = session.filtered_roots();

    assert_eq!(&*roots, session.forest().unwrap().outline());
}

#[test]
fn given_loaded_session_when_listing_options_then_sorted_and_distinct() {
    // Arrange
    let mut session = loaded_session();

    // Act & Assert
    assert_eq!(session.company_options(), vec!["Acme", "Beta", "Gamma"]);
    assert_eq!(
        session.team_options(),
        vec![
            "Comercial",
            "Dados",
            "Diretoria",
            DEFAULT_TEAM,
            "Plataforma",
            "Suporte",
            "Tecnologia"
        ]
    );

    session.set_company(Some("Beta".into()));
    assert_eq!(session.team_options(), vec!["Comercial", "Diretoria", DEFAULT_TEAM]);
}

#[test]
fn given_team_not_offered_by_new_company_when_selecting_company_then_team_is_cleared() {
    // Arrange
    let mut session = loaded_session();
    session.set_team(Some("Dados".into()));

    // Act
    session.set_company(Some("Beta".into()));

    // Assert
    assert_eq!(session.filters().team, None);
    assert_eq!(session.filters().active_company(), Some("Beta"));
}

#[test]
fn given_team_offered_by_new_company_when_selecting_company_then_team_is_kept() {
    // Arrange
    let mut session = loaded_session();

    // Act
    session.set_filters(
        FilterCriteria::new()
            .with_company("Beta")
            .with_team("Diretoria"),
    );

    // Assert
    assert_eq!(session.filters().active_team(), Some("Diretoria"));
    assert_eq!(root_ids(&session), vec!["Carla-Dias-4"]);
}

#[test]
fn given_selected_company_when_choosing_team_it_lacks_then_team_is_cleared() {
    // Arrange
    let mut session = loaded_session();
    session.set_company(Some("Beta".into()));

    // Act
    session.set_team(Some("Tecnologia".into()));

    // Assert
    assert_eq!(session.filters().team, None);
    assert_eq!(root_ids(&session), vec!["Carla-Dias-4", "Fabio-6"]);
}

#[test]
fn given_no_company_when_choosing_any_team_then_team_is_kept() {
    // Arrange
    let mut session = loaded_session();

    // Act
    session.set_team(Some("Tecnologia".into()));

    // Assert
    assert_eq!(session.filters().active_team(), Some("Tecnologia"));
    assert_eq!(root_ids(&session), vec!["Carla-Dias-0"]);
}

#[test]
fn given_filters_when_clearing_then_full_forest_is_back() {
    // Arrange
    let mut session = loaded_session();
    session.set_search(Some("gil".into()));
    assert_eq!(root_ids(&session), vec!["Carla-Dias-0"]);

    // Act
    session.clear_filters();

    // Assert
    assert_eq!(
        root_ids(&session),
        vec!["Carla-Dias-0", "Carla-Dias-4", "Fabio-6"]
    );
}

// ============================================================
// Detail view
// ============================================================

#[test]
fn given_manager_position_when_describing_then_counts_reports() {
    // Arrange
    let session = loaded_session();

    // Act
    let detail = session.detail("Carla-Dias-0").unwrap();

    // Assert
    assert_eq!(detail.name, "Carla Dias");
    assert_eq!(detail.manager, "Sem gestor direto");
    assert_eq!(detail.direct_reports, 2);
    assert_eq!(detail.total_reports, 4);
}

#[test]
fn given_position_with_manager_when_describing_then_shows_manager_name() {
    let session = loaded_session();

    let detail = session.detail("Ana-Souza-2").unwrap();

    assert_eq!(detail.manager, "Bruno Lima");
    assert_eq!(detail.team, "Dados");
    assert_eq!(detail.direct_reports, 0);
}

#[test]
fn given_unknown_id_when_describing_then_reports_not_found() {
    let session = loaded_session();

    let result = session.detail("Nobody-0");

    assert!(matches!(result, Err(ApplicationError::PositionNotFound(id)) if id == "Nobody-0"));
}
