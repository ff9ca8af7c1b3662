mod commands;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jazz_wheel_core::{AppConfig, JazzWheelError, JsonFileStore, NotationPreference, Session};
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::EnvFilter;

use crate::commands::{App, FilterArgs};

type Result<T> = jazz_wheel_core::Result<T>;

fn main() -> Result<()> {
    init_tracing();

    let Cli {
        config,
        preferences,
        command,
    } = Cli::parse();
    let locations = Locations {
        config,
        preferences,
    };
    let mut out = std::io::stdout().lock();

    match command {
        Commands::Transpose {
            root,
            semitones,
            notation,
        } => {
            writeln!(out, "{}", jazz_wheel_core::transpose(&root, semitones, notation))?;
            Ok(())
        }
        Commands::List => locations.open()?.list(&mut out),
        Commands::Spin { seed } => {
            tracing::debug!(?seed, "seeding the wheel");
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            locations.open()?.spin(&mut rng, &mut out)
        }
        Commands::Select { id } => locations.open()?.select(&id, &mut out),
        Commands::Scales { id, notation } => {
            locations.open()?.scales(id.as_deref(), notation, &mut out)
        }
        Commands::Back => locations.open()?.back(),
        Commands::Filter(args) => locations.open()?.filter(args, &mut out),
    }
}

/// Where the config and preference store live, resolved only by commands
/// that need saved state.
struct Locations {
    config: Option<PathBuf>,
    preferences: Option<PathBuf>,
}

impl Locations {
    fn open(&self) -> Result<App<JsonFileStore>> {
        let config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        let catalog = config.catalog()?;
        let preferences_path = self
            .preferences
            .clone()
            .or(config.preferences_path)
            .or_else(default_preferences_path)
            .ok_or_else(|| JazzWheelError::msg("could not determine a preferences location"))?;
        tracing::debug!(path = %preferences_path.display(), "using preference store");

        let session = Session::load(JsonFileStore::open(preferences_path)?)?;
        Ok(App::new(catalog, session))
    }
}

fn default_preferences_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "jazzwheel", "jazz-wheel")
        .map(|dirs| dirs.data_dir().join("preferences.json"))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Jazz standard picker and scale sheets", long_about = None)]
struct Cli {
    /// Optional JSON configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Preference store location, overriding the config and platform default.
    #[arg(short, long, global = true)]
    preferences: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the standards that pass the saved filters.
    List,
    /// Spin the wheel over the filtered standards and remember the winner.
    Spin {
        /// Seed for a reproducible draw.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Pick a standard by id and show its scales.
    Select { id: String },
    /// Show the recommended scales in Concert, Bb and Eb.
    Scales {
        /// Standard id; defaults to the last selected standard.
        id: Option<String>,
        /// Accidentals to use (`sharp`, `flat` or `auto`). Saved for next time.
        #[arg(short, long)]
        notation: Option<NotationPreference>,
    },
    /// Forget the last selected standard.
    Back,
    /// Toggle the saved repertoire filters.
    Filter(FilterArgs),
    /// Transpose a single note.
    Transpose {
        root: String,
        #[arg(allow_negative_numbers = true)]
        semitones: i32,
        #[arg(short, long, default_value = "auto")]
        notation: NotationPreference,
    },
}
