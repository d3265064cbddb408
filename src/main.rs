//! Command line front end: validates a submitted form read from a YAML file
//! and saves it in the store when it is valid.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use log::info;
use std::{
    collections::BTreeMap,
    fs::File,
    path::{Path, PathBuf},
    process::ExitCode,
};

use lmn::{
    config::Config,
    database::Database,
    forms::{
        FormData, LoginForm, NewNoteForm, SaveError, UserProfileForm, UserRegistrationForm,
    },
    models::{ArtistPk, ShowPk, UserPk, VenuePk},
    utils::validation::FormErrors,
};

#[derive(Parser)]
#[command(name = "lmn", about = "Leave Me a Note: validate and save submitted forms")]
struct Cli {
    /// Store file, overrides LMN_DB_PATH
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account from a registration form
    Register { form: PathBuf },
    /// Leave a note about a show
    Note {
        #[arg(long)]
        user: String,
        #[arg(long)]
        show: u64,
        form: PathBuf,
    },
    /// Replace a user's profile
    Profile {
        #[arg(long)]
        user: String,
        form: PathBuf,
    },
    /// Check a username and password
    Login { form: PathBuf },
    AddArtist { name: String },
    AddVenue { name: String, city: String },
    AddShow { artist: u64, venue: u64 },
}

fn main() -> Result<ExitCode> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let db_path = cli.db.unwrap_or_else(|| Config::from_env().db_path);
    let mut db = Database::open(db_path.clone())
        .with_context(|| format!("Could not open store {}", db_path.display()))?;
    info!("Using store {}", db_path.display());

    match run(&mut db, cli.command) {
        Ok(message) => {
            db.save()?;
            println!("{message}");
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => match invalid_form(&error) {
            Some(errors) => {
                eprintln!("{errors}");
                Ok(ExitCode::FAILURE)
            }
            None => Err(error),
        },
    }
}

fn run(db: &mut Database, command: Command) -> Result<String> {
    match command {
        Command::Register { form } => {
            let data = read_form(&form)?;
            let pk = UserRegistrationForm::new(&data).save(db)?;
            Ok(format!("Created user {pk}"))
        }
        Command::Note { user, show, form } => {
            let user = find_user(db, &user)?;
            let data = read_form(&form)?;
            let pk = NewNoteForm::new(&data).save(db, user, ShowPk(show))?;
            Ok(format!("Created note {pk}"))
        }
        Command::Profile { user, form } => {
            let user = find_user(db, &user)?;
            let data = read_form(&form)?;
            UserProfileForm::new(&data).save(db, user)?;
            Ok(format!("Updated profile of user {user}"))
        }
        Command::Login { form } => {
            let data = read_form(&form)?;
            let pk = LoginForm::new(&data).authenticate(db)?;
            Ok(format!("Logged in as user {pk}"))
        }
        Command::AddArtist { name } => Ok(format!("Created artist {}", db.add_artist(&name))),
        Command::AddVenue { name, city } => {
            Ok(format!("Created venue {}", db.add_venue(&name, &city)))
        }
        Command::AddShow { artist, venue } => {
            let pk = db.add_show(ArtistPk(artist), VenuePk(venue))?;
            Ok(format!("Created show {pk}"))
        }
    }
}

/// Field errors of a rejected form, as opposed to an operational failure
fn invalid_form(error: &anyhow::Error) -> Option<&FormErrors> {
    match error.downcast_ref::<SaveError>() {
        Some(SaveError::Invalid(errors)) => Some(errors),
        _ => error.downcast_ref::<FormErrors>(),
    }
}

fn find_user(db: &Database, username: &str) -> Result<UserPk> {
    db.lookup_username(username)
        .map(|user| user.pk)
        .ok_or_else(|| anyhow!("Unknown user {username}"))
}

/// Reads a YAML mapping of field names to scalar values
fn read_form(path: &Path) -> Result<FormData> {
    let file = File::open(path).with_context(|| format!("Could not open {}", path.display()))?;
    let fields: BTreeMap<String, serde_yaml::Value> = serde_yaml::from_reader(file)
        .with_context(|| format!("{} is not a YAML mapping", path.display()))?;

    fields
        .into_iter()
        .map(|(name, value)| {
            let value = match value {
                serde_yaml::Value::Null => String::new(),
                serde_yaml::Value::Bool(b) => b.to_string(),
                serde_yaml::Value::Number(n) => n.to_string(),
                serde_yaml::Value::String(s) => s,
                _ => bail!("Field {name} must be a single value"),
            };
            Ok((name, value))
        })
        .collect()
}
