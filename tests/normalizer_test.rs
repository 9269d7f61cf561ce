//! Tests for header normalization and required-column validation

use rstest::rstest;

use orgforest::domain::{
    build_forest, normalize, ColumnNames, DomainError, ForestConfig, Row, ValidationError,
};

fn full_row() -> Row {
    Row::new()
        .with("Empresa", "Acme")
        .with("G. Imediato", "")
        .with("Colaborador", "Ana")
        .with("Cargo", "CEO")
}

#[test]
fn given_padded_headers_when_normalizing_then_every_row_is_trimmed() {
    // Arrange
    let rows = vec![
        Row::new()
            .with(" Empresa", "Acme")
            .with("G. Imediato ", "")
            .with("\tColaborador\t", "Ana")
            .with("  Cargo  ", "CEO"),
        Row::new().with("  Colaborador", "Bia"),
    ];

    // Act
    let sheet = normalize(rows, &ColumnNames::default()).unwrap();

    // Assert
    let columns: Vec<&str> = sheet.rows[0].columns().collect();
    assert_eq!(columns, vec!["Empresa", "G. Imediato", "Colaborador", "Cargo"]);
    assert_eq!(sheet.rows[1].text("Colaborador"), "Bia");
    assert!(!sheet.has_team_column);
}

#[test]
fn given_team_column_in_first_row_when_normalizing_then_detects_it() {
    let sheet = normalize(vec![full_row().with(" Time ", "")], &ColumnNames::default()).unwrap();

    assert!(sheet.has_team_column);
}

#[test]
fn given_no_rows_when_building_then_fails_with_empty_input() {
    // Act
    let result = build_forest(Vec::new(), &ForestConfig::default());

    // Assert
    assert_eq!(
        result.unwrap_err(),
        DomainError::Validation(ValidationError::EmptyInput)
    );
}

#[test]
fn given_first_row_without_title_when_building_then_names_exactly_that_column() {
    // Arrange
    let rows = vec![
        Row::new()
            .with("Empresa", "Acme")
            .with("G. Imediato", "")
            .with("Colaborador", "Ana")
            .with("Time", "Dados"),
        full_row(),
    ];

    // Act
    let result = build_forest(rows, &ForestConfig::default());

    // Assert
    match result {
        Err(DomainError::Validation(ValidationError::MissingColumns { missing, found })) => {
            assert_eq!(missing, vec!["Cargo"]);
            assert_eq!(found, vec!["Empresa", "G. Imediato", "Colaborador", "Time"]);
        }
        other => panic!("expected missing columns, got {:?}", other),
    }
}

#[test]
fn given_missing_columns_when_formatting_then_message_lists_missing_and_found() {
    // Arrange
    let rows = vec![Row::new().with("Nome", "Ana").with("Cargo", "CEO")];

    // Act
    let err = normalize(rows, &ColumnNames::default()).unwrap_err();

    // Assert
    assert_eq!(
        err.to_string(),
        "missing required columns: [Empresa, G. Imediato, Colaborador]; columns found: [Nome, Cargo]"
    );
}

#[test]
fn given_later_row_missing_columns_when_building_then_only_first_row_is_checked() {
    // Arrange
    let rows = vec![full_row(), Row::new().with("Colaborador", "Bia")];

    // Act
    let forest = build_forest(rows, &ForestConfig::default()).unwrap();

    // Assert
    let bia = forest.get("Bia-1").unwrap();
    assert_eq!(bia.company, "");
    assert_eq!(bia.title, "");
    assert_eq!(bia.manager_name, None);
}

#[rstest]
#[case("Empresa")]
#[case("G. Imediato")]
#[case("Colaborador")]
#[case("Cargo")]
fn given_one_required_column_renamed_when_validating_then_reports_it(#[case] column: &str) {
    let columns = ColumnNames {
        company: "Company".into(),
        manager: "Manager".into(),
        collaborator: "Name".into(),
        title: "Title".into(),
        team: "Team".into(),
    };
    let renamed = [
        ("Empresa", "Company"),
        ("G. Imediato", "Manager"),
        ("Colaborador", "Name"),
        ("Cargo", "Title"),
    ];
    let row: Row = renamed
        .iter()
        .map(|(pt, en)| (if *pt == column { *pt } else { *en }, "x"))
        .collect();
    let expected = renamed
        .iter()
        .find(|(pt, _)| *pt == column)
        .map(|(_, en)| en.to_string())
        .unwrap();

    let err = normalize(vec![row], &columns).unwrap_err();

    match err {
        ValidationError::MissingColumns { missing, .. } => assert_eq!(missing, vec![expected]),
        other => panic!("expected missing columns, got {:?}", other),
    }
}
