//! wsec command line - validate connection profiles and inspect credential files.

use std::{error::Error, path::PathBuf, process};

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, instrument};
use wsec::{
    ca_ignore::CaIgnoreStore,
    config::EngineConfig,
    context::EditContext,
    material::{MaterialPurpose, is_candidate, validate_material},
    profile::ConnectionProfile,
    security::SecurityPage,
    tracing_config,
};

#[derive(Parser)]
#[command(name = "wsec")]
#[command(about = "Validate 802.1x and Wi-Fi security settings of connection profiles")]
struct Cli {
    /// Configuration file instead of the standard location.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Also write logs to a daily-rolling file in the data directory.
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the security settings of a profile file.
    Validate {
        profile: PathBuf,
        /// Write the normalised settings back to the file.
        #[arg(long)]
        save: bool,
        /// Treat the profile as a connection that has never been saved.
        #[arg(long)]
        new: bool,
    },
    /// Check a certificate or key file.
    Material {
        path: PathBuf,
        #[arg(short, long, value_enum)]
        purpose: PurposeArg,
    },
    /// Query or change the CA-ignore table.
    CaIgnore {
        #[command(subcommand)]
        command: CaIgnoreCommands,
    },
    /// Print the JSON Schema of the configuration file.
    Schema,
}

#[derive(Subcommand)]
enum CaIgnoreCommands {
    /// Show both flags of a connection.
    Get { uuid: String },
    /// Set the outer (or with --phase2, inner) flag of a connection.
    Set {
        uuid: String,
        #[arg(action = clap::ArgAction::Set)]
        ignored: bool,
        #[arg(long)]
        phase2: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PurposeArg {
    Ca,
    ClientCert,
    PrivateKey,
}

impl From<PurposeArg> for MaterialPurpose {
    fn from(arg: PurposeArg) -> Self {
        match arg {
            PurposeArg::Ca => MaterialPurpose::CaCert,
            PurposeArg::ClientCert => MaterialPurpose::ClientCert,
            PurposeArg::PrivateKey => MaterialPurpose::PrivateKey,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::load_default()?,
    };
    let _guard = if cli.log_file {
        Some(tracing_config::init_with_file(config.general.log_level)?)
    } else {
        tracing_config::init(config.general.log_level)?;
        None
    };

    match cli.command {
        Commands::Validate { profile, save, new } => validate(&config, profile, save, new),
        Commands::Material { path, purpose } => material(path, purpose.into()),
        Commands::CaIgnore { command } => ca_ignore(&config, command),
        Commands::Schema => {
            println!("{}", EngineConfig::json_schema()?);
            Ok(())
        }
    }
}

#[instrument(skip(config))]
fn validate(
    config: &EngineConfig,
    path: PathBuf,
    save: bool,
    new: bool,
) -> Result<(), Box<dyn Error>> {
    let mut profile = ConnectionProfile::load(&path)?;
    let store = CaIgnoreStore::open(&config.ca_ignore_path()?)?;
    let ctx = EditContext::for_profile(&profile, &config.secrets, new);

    let mut page = SecurityPage::new(ctx, store);
    page.load(&profile);
    debug!(kind = %page.kind(), "detected security type");

    let report = if save {
        let report = page.save(&mut profile)?;
        profile.save(&path)?;
        report
    } else {
        page.validate(&profile)?
    };

    for warning in report.warnings() {
        println!("warning: {warning}");
    }
    println!("{}: {} ok", path.display(), page.kind());
    Ok(())
}

fn material(path: PathBuf, purpose: MaterialPurpose) -> Result<(), Box<dyn Error>> {
    let Some(material) = validate_material(Some(path.as_path()), purpose, None)? else {
        println!("no file selected");
        return Ok(());
    };

    println!("path:      {}", material.path.display());
    println!("format:    {}", material.format);
    if purpose == MaterialPurpose::PrivateKey {
        println!("encrypted: {}", material.encrypted);
    }
    println!("candidate: {}", is_candidate(&path, purpose));
    Ok(())
}

fn ca_ignore(config: &EngineConfig, command: CaIgnoreCommands) -> Result<(), Box<dyn Error>> {
    let store = CaIgnoreStore::open(&config.ca_ignore_path()?)?;

    match command {
        CaIgnoreCommands::Get { uuid } => {
            println!("ignore-ca-cert = {}", store.get_ignore(&uuid, false));
            println!("ignore-phase2-ca-cert = {}", store.get_ignore(&uuid, true));
        }
        CaIgnoreCommands::Set {
            uuid,
            ignored,
            phase2,
        } => {
            store.set_ignore(&uuid, phase2, ignored);
            store.persist(&uuid)?;
        }
    }
    Ok(())
}
