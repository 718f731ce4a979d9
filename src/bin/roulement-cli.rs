#![forbid(unsafe_code)]
use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use roulement::{
    clock::{Clock, SystemClock},
    engine::workload,
    io,
    model::{ShiftType, Slot, Worker, WorkerId},
    period::{Period, WeekStart},
    storage::{JsonStorage, Storage},
    warning::{render_warnings, TextWarning},
    workspace::Workspace,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planification d'équipes par créneaux
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON d'état
    #[arg(long, global = true, default_value = "planning.json")]
    state: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ajouter un membre
    AddWorker {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        work_id: String,
        /// Identifiant explicite (sinon aléatoire)
        #[arg(long)]
        id: Option<String>,
    },

    /// Modifier le nom ou le matricule d'un membre
    EditWorker {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        work_id: Option<String>,
    },

    /// Retirer un membre (ses affectations restent)
    RemoveWorker {
        #[arg(long)]
        id: String,
    },

    /// Importer des membres depuis un CSV
    ImportWorkers {
        #[arg(long)]
        csv: String,
    },

    /// Lister les membres
    Workers,

    /// Remplacer la liste d'un créneau (liste vide = suppression)
    Set {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        shift: ShiftType,
        /// liste "id1,id2,..."
        #[arg(long, default_value = "")]
        workers: String,
    },

    /// Déplacer un membre d'un créneau à un autre
    Move {
        #[arg(long)]
        from_date: NaiveDate,
        #[arg(long)]
        from_shift: ShiftType,
        #[arg(long)]
        index: usize,
        #[arg(long)]
        to_date: NaiveDate,
        #[arg(long)]
        to_shift: ShiftType,
        #[arg(long, default_value_t = 0)]
        to_index: usize,
    },

    /// Afficher une période et optionnellement l'exporter
    Show {
        /// YYYY-MM-DD (semaine) ou YYYY-MM (mois) ; semaine courante par défaut
        #[arg(long)]
        period: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
    },

    /// Suggestions d'équilibrage pour les créneaux libres
    Suggest {
        #[arg(long)]
        period: Option<String>,
        /// Fusionner les suggestions dans le planning
        #[arg(long)]
        apply: bool,
    },

    /// Charge par membre (nombre de créneaux)
    Load {
        #[arg(long)]
        period: Option<String>,
    },

    /// Vérifier les conflits
    Check {
        #[arg(long)]
        period: Option<String>,
    },

    /// Enregistrer une semaine comme modèle
    Capture {
        #[arg(long)]
        name: String,
        /// Une date de la semaine ; semaine courante par défaut
        #[arg(long)]
        week: Option<NaiveDate>,
    },

    /// Appliquer un modèle sur une semaine (remplace son contenu)
    Apply {
        #[arg(long)]
        name: String,
        #[arg(long)]
        week: Option<NaiveDate>,
    },

    /// Lister les modèles
    Templates,

    /// Supprimer un modèle
    RemoveTemplate {
        #[arg(long)]
        name: String,
    },

    /// Retirer des affectations les membres absents du roster
    PruneOrphans,

    /// Modifier les options du moteur
    Config {
        #[arg(long)]
        week_start: Option<WeekStart>,
        #[arg(long)]
        dedupe: Option<bool>,
    },
}

fn resolve_period(ws: &Workspace, raw: Option<&str>) -> Result<Period> {
    let week_start = ws.engine().options().week_start;
    match raw {
        Some(raw) => Ok(Period::parse(raw, week_start)?),
        None => Ok(Period::week_containing(SystemClock.today(), week_start)?),
    }
}

fn resolve_week(ws: &Workspace, date: Option<NaiveDate>) -> Result<Period> {
    Ok(ws.engine().week_of(date.unwrap_or_else(|| SystemClock.today()))?)
}

fn parse_ids(raw: &str) -> Vec<WorkerId> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(WorkerId::new)
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let storage = JsonStorage::open(&cli.state)?;
    let mut ws = Workspace::from_state(storage.load_or_default()?);

    let code = match cli.cmd {
        Commands::AddWorker { name, work_id, id } => {
            let worker = match id {
                Some(id) => Worker::with_id(WorkerId::new(id), name, work_id),
                None => Worker::new(name, work_id),
            };
            let id = worker.id.clone();
            ws.roster_mut().add(worker)?;
            storage.save(&ws.snapshot())?;
            println!("{id}");
            0
        }
        Commands::EditWorker { id, name, work_id } => {
            ws.roster_mut().update(&WorkerId::new(id), name, work_id)?;
            storage.save(&ws.snapshot())?;
            0
        }
        Commands::RemoveWorker { id } => {
            let id = WorkerId::new(id);
            if ws.roster_mut().remove(&id).is_none() {
                bail!("unknown worker: {id}");
            }
            storage.save(&ws.snapshot())?;
            0
        }
        Commands::ImportWorkers { csv } => {
            let workers = io::import_workers_csv(csv)?;
            let count = workers.len();
            for worker in workers {
                ws.roster_mut().add(worker)?;
            }
            storage.save(&ws.snapshot())?;
            println!("imported {count} worker(s)");
            0
        }
        Commands::Workers => {
            for w in ws.roster() {
                println!("{} | {} | {}", w.id, w.display_name, w.work_id);
            }
            0
        }
        Commands::Set { date, shift, workers } => {
            ws.set_workers(Slot::new(date, shift), parse_ids(&workers));
            storage.save(&ws.snapshot())?;
            0
        }
        Commands::Move {
            from_date,
            from_shift,
            index,
            to_date,
            to_shift,
            to_index,
        } => {
            ws.move_worker(
                Slot::new(from_date, from_shift),
                index,
                Slot::new(to_date, to_shift),
                to_index,
            )?;
            storage.save(&ws.snapshot())?;
            0
        }
        Commands::Show {
            period,
            out_csv,
            out_json,
        } => {
            let period = resolve_period(&ws, period.as_deref())?;
            if let Some(path) = out_csv {
                io::export_period_csv(path, &period, ws.store(), ws.roster())?;
            }
            if let Some(path) = out_json {
                io::export_state_json(path, &ws.snapshot())?;
            }
            for (slot, assignment) in ws.store().list_for_period(&period) {
                let names = assignment
                    .map(|a| {
                        a.worker_ids
                            .iter()
                            .map(|id| ws.roster().display_name_of(id))
                            .collect::<Vec<_>>()
                            .join(", ")
                    })
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{} {:<5} {} | {}",
                    slot.date,
                    slot.shift_type,
                    slot.shift_type.time_range(),
                    names
                );
            }
            0
        }
        Commands::Suggest { period, apply } => {
            let period = resolve_period(&ws, period.as_deref())?;
            let suggestions = ws.suggest(&period);
            for s in &suggestions {
                let id = &s.worker_ids[0];
                println!(
                    "{} {:<5} -> {}",
                    s.slot.date,
                    s.slot.shift_type,
                    ws.roster().display_name_of(id)
                );
            }
            if apply {
                let added = ws.apply_suggestions(&period);
                storage.save(&ws.snapshot())?;
                println!("applied {added} suggestion(s)");
            }
            0
        }
        Commands::Load { period } => {
            let period = resolve_period(&ws, period.as_deref())?;
            for row in workload(ws.store().assignments_in(&period), ws.roster()) {
                let marker = if row.in_roster { "" } else { " (orphan)" };
                println!(
                    "{} | {}{}",
                    ws.roster().display_name_of(&row.worker),
                    row.slots,
                    marker
                );
            }
            0
        }
        Commands::Check { period } => {
            let period = resolve_period(&ws, period.as_deref())?;
            let conflicts = ws.conflicts(&period);
            if conflicts.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                for line in render_warnings(&conflicts, ws.roster(), &TextWarning) {
                    println!("{line}");
                }
                // Code 2 = WARNING
                2
            }
        }
        Commands::Capture { name, week } => {
            let week = resolve_week(&ws, week)?;
            let count = ws.capture_template(&name, &week)?.assignments.len();
            storage.save(&ws.snapshot())?;
            println!("captured {count} assignment(s) from {week} as {name}");
            0
        }
        Commands::Apply { name, week } => {
            let week = resolve_week(&ws, week)?;
            let installed = ws
                .apply_template(&name, &week)
                .ok_or_else(|| anyhow!("unknown template: {name}"))?;
            storage.save(&ws.snapshot())?;
            println!("applied {name} to {week}: {installed} assignment(s)");
            0
        }
        Commands::Templates => {
            for t in ws.templates().iter() {
                println!("{} | {} assignment(s)", t.name, t.assignments.len());
            }
            0
        }
        Commands::RemoveTemplate { name } => {
            if ws.remove_template(&name).is_none() {
                bail!("unknown template: {name}");
            }
            storage.save(&ws.snapshot())?;
            0
        }
        Commands::PruneOrphans => {
            let report = ws.prune_orphans();
            storage.save(&ws.snapshot())?;
            println!("pruned {} orphaned entrie(s)", report.removed.len());
            0
        }
        Commands::Config { week_start, dedupe } => {
            let mut options = ws.engine().options();
            if let Some(week_start) = week_start {
                options.week_start = week_start;
            }
            if let Some(dedupe) = dedupe {
                options.dedupe_worker_ids = dedupe;
            }
            ws.set_options(options);
            storage.save(&ws.snapshot())?;
            println!("{}", serde_json::to_string(&options)?);
            0
        }
    };

    std::process::exit(code);
}
