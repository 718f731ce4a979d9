use crate::engine::{detect_conflicts, Conflict};
use crate::model::{Assignment, Roster};

/// Permet de customiser le texte d'un avertissement (console, UI, etc.).
pub trait WarningRenderer {
    fn render(&self, conflict: &Conflict, roster: &Roster) -> String;
}

/// Gabarit texte simple.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextWarning;

impl WarningRenderer for TextWarning {
    fn render(&self, conflict: &Conflict, roster: &Roster) -> String {
        let shifts: Vec<&str> = conflict.shift_types.iter().map(|s| s.as_str()).collect();
        format!(
            "{name} ({id}) est affecté à plusieurs postes le {date} : {shifts}",
            name = roster.display_name_of(&conflict.worker),
            id = conflict.worker,
            date = conflict.date,
            shifts = shifts.join(", ")
        )
    }
}

/// Un avertissement par conflit, dans l'ordre des conflits.
pub fn render_warnings(
    conflicts: &[Conflict],
    roster: &Roster,
    renderer: &dyn WarningRenderer,
) -> Vec<String> {
    conflicts.iter().map(|c| renderer.render(c, roster)).collect()
}

/// Règle de conflit + rendu texte, en un appel.
pub fn conflict_warnings<'a, I>(assignments: I, roster: &Roster) -> Vec<String>
where
    I: IntoIterator<Item = &'a Assignment>,
{
    render_warnings(&detect_conflicts(assignments), roster, &TextWarning)
}
