use crate::model::{Assignment, ShiftType, Slot, WorkerId};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template name cannot be empty")]
    EmptyName,
}

/// Affectation d'un modèle, repérée par son décalage dans la semaine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateEntry {
    /// Jour de la semaine, 0 = dimanche .. 6 = samedi.
    pub offset: u8,
    pub shift_type: ShiftType,
    pub worker_ids: Vec<WorkerId>,
}

/// Semaine type, indépendante de toute date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekTemplate {
    pub name: String,
    #[serde(default)]
    pub assignments: Vec<TemplateEntry>,
}

impl WeekTemplate {
    /// Matérialise le modèle sur la semaine commençant à `week_start` :
    /// chaque entrée tombe sur le jour de même rang dans cette semaine,
    /// quel que soit le premier jour configuré.
    pub fn materialize(&self, week_start: NaiveDate) -> Vec<Assignment> {
        let first = week_start.weekday().num_days_from_sunday();
        self.assignments
            .iter()
            .filter(|e| !e.worker_ids.is_empty())
            .filter_map(|e| {
                let delta = (u32::from(e.offset) % 7 + 7 - first) % 7;
                let Some(date) = week_start.checked_add_signed(Duration::days(i64::from(delta))) else {
                    tracing::warn!(%week_start, offset = e.offset, "template entry beyond calendar skipped");
                    return None;
                };
                Some(Assignment::new(Slot::new(date, e.shift_type), e.worker_ids.clone()))
            })
            .collect()
    }
}

/// Modèles nommés. Une capture sous un nom existant remplace l'ancienne.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateManager {
    templates: BTreeMap<String, WeekTemplate>,
}

impl TemplateManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture les affectations de la semaine commençant à `week_start`.
    /// Les affectations hors de la semaine sont ignorées.
    pub fn capture<'a, I>(
        &mut self,
        name: &str,
        week_start: NaiveDate,
        week_assignments: I,
    ) -> Result<&WeekTemplate, TemplateError>
    where
        I: IntoIterator<Item = &'a Assignment>,
    {
        let name = name.trim();
        if name.is_empty() {
            return Err(TemplateError::EmptyName);
        }

        let mut entries = Vec::new();
        for assignment in week_assignments {
            let days = (assignment.slot.date - week_start).num_days();
            if !(0..7).contains(&days) {
                tracing::warn!(slot = %assignment.slot, %week_start, "assignment outside captured week skipped");
                continue;
            }
            if assignment.worker_ids.is_empty() {
                continue;
            }
            entries.push(TemplateEntry {
                offset: assignment.slot.date.weekday().num_days_from_sunday() as u8,
                shift_type: assignment.slot.shift_type,
                worker_ids: assignment.worker_ids.clone(),
            });
        }
        // ordre de la semaine capturée
        let first = week_start.weekday().num_days_from_sunday();
        entries.sort_by_key(|e| ((u32::from(e.offset) + 7 - first) % 7, e.shift_type));

        let template = WeekTemplate {
            name: name.to_string(),
            assignments: entries,
        };
        if self.templates.insert(name.to_string(), template).is_some() {
            tracing::debug!(name, "template overwritten");
        }
        Ok(&self.templates[name])
    }

    /// `None` si le nom est inconnu ; sinon les affectations datées de la
    /// semaine cible, à installer en remplacement de son contenu.
    pub fn apply(&self, name: &str, target_week_start: NaiveDate) -> Option<Vec<Assignment>> {
        let template = self.get(name)?;
        Some(template.materialize(target_week_start))
    }

    /// Les noms sont comparés sans les espaces de bord, comme à la capture.
    pub fn get(&self, name: &str) -> Option<&WeekTemplate> {
        self.templates.get(name.trim())
    }

    pub fn remove(&mut self, name: &str) -> Option<WeekTemplate> {
        self.templates.remove(name.trim())
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeekTemplate> {
        self.templates.values()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
