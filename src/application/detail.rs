//! Read-only summary of one position.

use std::fmt;

use serde::Serialize;

use crate::config::Labels;
use crate::domain::Position;

/// What the detail view shows for a position, placeholders already applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionDetail {
    pub id: String,
    pub name: String,
    pub title: String,
    pub company: String,
    pub team: String,
    pub manager: String,
    /// Number of direct reports
    pub direct_reports: usize,
    /// Number of positions anywhere below this one
    pub total_reports: usize,
}

impl PositionDetail {
    pub fn new(
        position: &Position,
        direct_reports: usize,
        total_reports: usize,
        labels: &Labels,
    ) -> Self {
        let team = if position.team.trim().is_empty() {
            labels.team_missing.clone()
        } else {
            position.team.clone()
        };
        let manager = position
            .manager_name
            .clone()
            .unwrap_or_else(|| labels.no_manager.clone());

        Self {
            id: position.id.clone(),
            name: position.name.clone(),
            title: position.title.clone(),
            company: position.company.clone(),
            team,
            manager,
            direct_reports,
            total_reports,
        }
    }
}

impl fmt::Display for PositionDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "  Cargo:   {}", self.title)?;
        writeln!(f, "  Empresa: {}", self.company)?;
        writeln!(f, "  Time:    {}", self.team)?;
        writeln!(f, "  Gestor:  {}", self.manager)?;
        write!(
            f,
            "  Equipe:  {} diretos, {} no total",
            self.direct_reports, self.total_reports
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_position_without_manager_or_team_when_describing_then_uses_placeholders() {
        let position = Position {
            id: "Ana-0".into(),
            name: "Ana".into(),
            manager_name: None,
            title: "CEO".into(),
            company: "Acme".into(),
            team: String::new(),
        };

        let detail = PositionDetail::new(&position, 2, 5, &Labels::default());

        assert_eq!(detail.team, "Não informado");
        assert_eq!(detail.manager, "Sem gestor direto");
        assert!(detail.to_string().contains("2 diretos, 5 no total"));
    }
}
