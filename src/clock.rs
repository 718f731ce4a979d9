use chrono::{Local, NaiveDate};

/// Source de la date courante (choix de la période par défaut).
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Horloge système, date locale.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Horloge figée, pour les tests et le rejeu.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
