/// Tempo Replay - command feed runner for the playback engine
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tempo_core::Library;
use tempo_replay::{command, output, ReplayConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tempo-replay")]
#[command(about = "Replay player commands against the Tempo playback engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a command feed and write the outputs
    Run {
        /// Library JSON file
        #[arg(short, long)]
        library: PathBuf,

        /// Command feed JSON file
        #[arg(short, long)]
        commands: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file path
        #[arg(long, env = "TEMPO_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Parse the inputs and report what they contain
    Check {
        /// Library JSON file
        #[arg(short, long)]
        library: PathBuf,

        /// Command feed JSON file
        #[arg(short, long)]
        commands: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the output JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tempo_replay=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            library,
            commands,
            output,
            config,
        } => run(&library, &commands, output.as_deref(), config.as_deref()),
        Commands::Check { library, commands } => check(&library, &commands),
    }
}

fn run(
    library_path: &Path,
    commands_path: &Path,
    output_path: Option<&Path>,
    config_path: Option<&Path>,
) -> anyhow::Result<()> {
    let config = ReplayConfig::load_from(config_path)?;
    config.validate()?;

    let (library, commands) = read_inputs(library_path, commands_path)?;
    tracing::info!(
        users = library.users.len(),
        commands = commands.len(),
        "Starting replay"
    );

    let outputs = tempo_replay::replay(library, &commands, &config.playback)?;

    match output_path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            output::write_outputs(BufWriter::new(file), &outputs, config.output.pretty)?;
            tracing::info!(path = %path.display(), "Outputs written");
        }
        None => {
            let stdout = std::io::stdout();
            output::write_outputs(stdout.lock(), &outputs, config.output.pretty)?;
        }
    }

    Ok(())
}

fn check(library_path: &Path, commands_path: &Path) -> anyhow::Result<()> {
    let (library, commands) = read_inputs(library_path, commands_path)?;
    let supported = commands.iter().filter(|c| c.kind().is_some()).count();

    println!("Library:");
    println!("  songs:     {}", library.songs.len());
    println!("  podcasts:  {}", library.podcasts.len());
    println!("  playlists: {}", library.playlists.len());
    println!("  albums:    {}", library.albums.len());
    println!("  users:     {}", library.users.len());
    println!("Commands:");
    println!("  total:     {}", commands.len());
    println!("  player:    {}", supported);
    println!("  skipped:   {}", commands.len() - supported);

    Ok(())
}

fn read_inputs(
    library_path: &Path,
    commands_path: &Path,
) -> anyhow::Result<(Library, Vec<command::Command>)> {
    let library = Library::from_path(library_path)
        .with_context(|| format!("Failed to load library {}", library_path.display()))?;
    let commands = command::load_commands(commands_path)
        .with_context(|| format!("Failed to load commands {}", commands_path.display()))?;

    Ok((library, commands))
}
