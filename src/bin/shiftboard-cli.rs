#![forbid(unsafe_code)]
use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use shiftboard::{
    accounts, admin, find_overlaps, io, load_pattern_from_file,
    model::{Board, ScheduleId, ShiftId, UserId},
    staff,
    storage::{JsonStorage, Storage},
    ShiftFilter, Strategy,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planification de shifts (board JSON local)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du board
    #[arg(long, global = true, env = "SHIFTBOARD_BOARD", default_value = "board.json")]
    board: String,

    /// Compte qui agit (username)
    #[arg(long = "as", global = true, env = "SHIFTBOARD_USER")]
    acting: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Créer un compte
    AddUser {
        #[arg(long)]
        username: String,
        /// admin | staff | user
        #[arg(long, default_value = "staff")]
        role: String,
    },

    /// Lister les comptes
    ListUsers,

    /// Renommer un compte
    RenameUser {
        #[arg(long)]
        username: String,
        #[arg(long)]
        new_name: String,
    },

    /// Importer des comptes depuis un CSV `username[,role]`
    ImportStaff {
        #[arg(long)]
        csv: String,
    },

    /// Créer un planning (admin)
    CreateSchedule {
        #[arg(long)]
        name: String,
    },

    /// Supprimer un planning et ses shifts (admin)
    DeleteSchedule {
        #[arg(long)]
        schedule: String,
    },

    /// Ajouter un template non assigné (admin)
    AddTemplate {
        #[arg(long)]
        schedule: String,
        /// RFC3339 ou `YYYY-MM-DD HH:MM:SS` (UTC)
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },

    /// Importer des templates depuis un CSV `start,end` (admin)
    ImportTemplates {
        #[arg(long)]
        schedule: String,
        #[arg(long)]
        csv: String,
    },

    /// Générer des templates depuis un motif hebdomadaire JSON (admin)
    Seed {
        #[arg(long)]
        schedule: String,
        #[arg(long)]
        pattern: String,
        /// YYYY-MM-DD
        #[arg(long)]
        from: NaiveDate,
        /// YYYY-MM-DD (inclus)
        #[arg(long)]
        to: NaiveDate,
    },

    /// Assigner manuellement un shift à un membre du staff (admin)
    Assign {
        #[arg(long)]
        schedule: String,
        /// username du staff
        #[arg(long)]
        staff: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },

    /// Assignation automatique des templates libres (admin)
    AutoSchedule {
        #[arg(long)]
        schedule: String,
        /// even | minimal | balanced
        #[arg(long)]
        method: String,
    },

    /// Lister les stratégies disponibles
    Strategies,

    /// Rapport des shifts, optionnellement filtré et exporté (admin)
    Report {
        #[arg(long)]
        schedule: Option<String>,
        /// username du staff
        #[arg(long)]
        staff: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Détail d'un planning (admin)
    ShowSchedule {
        #[arg(long)]
        schedule: String,
    },

    /// Roster du compte courant
    Roster,

    /// Détail d'un shift
    ShowShift {
        #[arg(long)]
        shift: String,
    },

    /// Pointer l'arrivée
    ClockIn {
        #[arg(long)]
        shift: String,
    },

    /// Pointer le départ
    ClockOut {
        #[arg(long)]
        shift: String,
    },

    /// Signaler les shifts qui se chevauchent pour une même personne
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.board)?;
    let mut board = storage.load_or_default()?;
    let acting = cli.acting.as_deref();

    let code = match cli.cmd {
        Commands::AddUser { username, role } => {
            let id = accounts::create_user(&mut board, &username, &role)?;
            storage.save(&board)?;
            println!("{id}");
            0
        }
        Commands::ListUsers => {
            print_json(&accounts::list_users(&board))?;
            0
        }
        Commands::RenameUser { username, new_name } => {
            let id = lookup(&board, &username)?;
            accounts::rename_user(&mut board, &id, &new_name)?;
            storage.save(&board)?;
            println!("{id}");
            0
        }
        Commands::ImportStaff { csv } => {
            let imported = io::import_accounts_csv(csv)?;
            let count = imported.len();
            for account in imported {
                accounts::add_account(&mut board, account)?;
            }
            storage.save(&board)?;
            println!("imported {count} account(s)");
            0
        }
        Commands::CreateSchedule { name } => {
            let me = whoami(&board, acting)?;
            let id = admin::create_schedule(&mut board, &me, &name, Utc::now())?;
            storage.save(&board)?;
            println!("{id}");
            0
        }
        Commands::DeleteSchedule { schedule } => {
            let me = whoami(&board, acting)?;
            let removed = admin::delete_schedule(&mut board, &me, &ScheduleId::new(schedule))?;
            storage.save(&board)?;
            println!("deleted schedule and {removed} shift(s)");
            0
        }
        Commands::AddTemplate {
            schedule,
            start,
            end,
        } => {
            let me = whoami(&board, acting)?;
            let start = io::parse_timestamp(&start)?;
            let end = io::parse_timestamp(&end)?;
            let id = admin::add_template(&mut board, &me, &ScheduleId::new(schedule), start, end)?;
            storage.save(&board)?;
            println!("{id}");
            0
        }
        Commands::ImportTemplates { schedule, csv } => {
            let me = whoami(&board, acting)?;
            let schedule = ScheduleId::new(schedule);
            let ranges = io::import_templates_csv(csv)?;
            let count = ranges.len();
            for (start, end) in ranges {
                admin::add_template(&mut board, &me, &schedule, start, end)?;
            }
            storage.save(&board)?;
            println!("imported {count} template(s)");
            0
        }
        Commands::Seed {
            schedule,
            pattern,
            from,
            to,
        } => {
            let me = whoami(&board, acting)?;
            let pattern = load_pattern_from_file(&pattern)?;
            let count = admin::seed_from_pattern(
                &mut board,
                &me,
                &ScheduleId::new(schedule),
                &pattern,
                from,
                to,
            )?;
            storage.save(&board)?;
            println!("seeded {count} template(s)");
            0
        }
        Commands::Assign {
            schedule,
            staff,
            start,
            end,
        } => {
            let me = whoami(&board, acting)?;
            let member = lookup(&board, &staff)?;
            let start = io::parse_timestamp(&start)?;
            let end = io::parse_timestamp(&end)?;
            let view = admin::schedule_shift(
                &mut board,
                &me,
                &member,
                &ScheduleId::new(schedule),
                start,
                end,
            )?;
            storage.save(&board)?;
            print_json(&view)?;
            0
        }
        Commands::AutoSchedule { schedule, method } => {
            let me = whoami(&board, acting)?;
            let assigned =
                admin::auto_schedule(&mut board, &me, &ScheduleId::new(schedule), &method)?;
            storage.save(&board)?;
            print_json(&assigned)?;
            0
        }
        Commands::Strategies => {
            for strategy in Strategy::ALL {
                println!("{:<10} {}", strategy.key(), strategy.label());
            }
            0
        }
        Commands::Report {
            schedule,
            staff,
            out_json,
            out_csv,
        } => {
            let me = whoami(&board, acting)?;
            let filter = ShiftFilter {
                schedule: schedule.map(ScheduleId::new),
                staff: staff.map(|name| lookup(&board, &name)).transpose()?,
            };
            let shifts = admin::shift_report(&board, &me, &filter)?;
            if let Some(path) = out_json {
                io::export_report_json(path, &shifts)?;
            }
            if let Some(path) = out_csv {
                io::export_report_csv(path, &shifts)?;
            }
            // impression compacte
            for s in &shifts {
                println!(
                    "{} | {} → {} | {}",
                    s.id,
                    s.start_time,
                    s.end_time,
                    s.staff_name.as_deref().unwrap_or("-")
                );
            }
            0
        }
        Commands::ShowSchedule { schedule } => {
            let me = whoami(&board, acting)?;
            let view = admin::schedule_report(&board, &me, &ScheduleId::new(schedule))?;
            print_json(&view)?;
            0
        }
        Commands::Roster => {
            let me = whoami(&board, acting)?;
            print_json(&staff::view_roster(&board, &me)?)?;
            0
        }
        Commands::ShowShift { shift } => {
            print_json(&staff::get_shift(&board, &ShiftId::new(shift))?)?;
            0
        }
        Commands::ClockIn { shift } => {
            let me = whoami(&board, acting)?;
            let view = staff::clock_in(&mut board, &me, &ShiftId::new(shift), Utc::now())?;
            storage.save(&board)?;
            print_json(&view)?;
            0
        }
        Commands::ClockOut { shift } => {
            let me = whoami(&board, acting)?;
            let view = staff::clock_out(&mut board, &me, &ShiftId::new(shift), Utc::now())?;
            storage.save(&board)?;
            print_json(&view)?;
            0
        }
        Commands::Check => {
            let overlaps = find_overlaps(&board);
            if overlaps.is_empty() {
                println!("OK: no overlapping shifts");
                0
            } else {
                eprintln!("Found {} overlap(s)", overlaps.len());
                for o in &overlaps {
                    let who = board
                        .find_account(&o.staff)
                        .map_or(o.staff.as_str(), |a| a.username.as_str());
                    println!("{who} | {} ∩ {}", o.shift_a, o.shift_b);
                }
                // Code 2 = WARNING
                2
            }
        }
    };

    std::process::exit(code);
}

fn whoami(board: &Board, acting: Option<&str>) -> Result<UserId> {
    let username = acting.context("missing acting user: pass --as <username>")?;
    lookup(board, username)
}

fn lookup(board: &Board, username: &str) -> Result<UserId> {
    board
        .find_account_by_username(username)
        .map(|a| a.id.clone())
        .ok_or_else(|| anyhow!("unknown user: {username}"))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
