use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use neo_tools::database::NeoDatabase;
use neo_tools::{Result, logging, pipeline};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = logging::init().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let db = pipeline::load_database(&cli.neofile, &cli.cadfile)?;
    match cli.command {
        Command::Inspect(args) => execute_inspect(&db, args),
        Command::Export(args) => execute_export(&db, args),
    }
}

fn execute_inspect(db: &NeoDatabase, args: InspectArgs) -> Result<()> {
    let neo = match (&args.pdes, &args.name) {
        (Some(pdes), _) => db.get_neo_by_designation(pdes),
        (None, Some(name)) => db.get_neo_by_name(name),
        (None, None) => None,
    };

    let Some(neo) = neo else {
        println!("No matching NEOs exist in the database.");
        return Ok(());
    };

    println!("{neo}");
    if args.verbose {
        for approach in db.approaches_of(neo) {
            println!("- {}", db.link(approach)?.describe()?);
        }
    }
    Ok(())
}

fn execute_export(db: &NeoDatabase, args: ExportArgs) -> Result<()> {
    let limit = args.limit.unwrap_or(usize::MAX);
    let count = pipeline::export(db.linked_approaches().take(limit), &args.output)?;
    println!("Wrote {count} close approaches to {}", args.output.display());
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Explore and export close approaches of near-Earth objects."
)]
struct Cli {
    /// CSV catalog of near-Earth objects.
    #[arg(long, global = true, default_value = "data/neos.csv")]
    neofile: PathBuf,

    /// JSON table of close approaches.
    #[arg(long, global = true, default_value = "data/cad.json")]
    cadfile: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show a single near-Earth object.
    Inspect(InspectArgs),
    /// Write linked close approaches to a .csv or .json file.
    Export(ExportArgs),
}

#[derive(Args)]
struct InspectArgs {
    /// Primary designation of the object.
    #[arg(long, conflicts_with = "name", required_unless_present = "name")]
    pdes: Option<String>,

    /// IAU name of the object.
    #[arg(long)]
    name: Option<String>,

    /// Also list the object's close approaches.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args)]
struct ExportArgs {
    /// Output file; the extension selects the format.
    #[arg(long)]
    output: PathBuf,

    /// Maximum number of approaches to write.
    #[arg(long)]
    limit: Option<usize>,
}
