/*!
# Sprout - A Plant Journal

Sprout identifies plants from photos, generates plant images from text, and
keeps a local journal of the plants you have identified.

## Usage

```
sprout [OPTIONS] <COMMAND>

Commands:
  list      List journal entries, newest first
  show      Show one entry with its notes
  identify  Identify the plant in a photo
  generate  Generate a photorealistic plant image from a description
  favorite  Toggle the favorite flag on an entry
  note      Add a note to an entry
  delete    Delete an entry

Options:
  -v, --verbose                  Print verbose output
      --log-format <LOG_FORMAT>  Log output format [default: text] [possible values: text, json]
```

## Configuration

- `GEMINI_API_KEY`: credential for the primary backend
- `OPENAI_API_KEY`: credential for the secondary backend; when set, it is used instead
- `SPROUT_DIR`: where the journal is stored (defaults to "~/.local/share/sprout")
- `SPROUT_LANGUAGE`: language of the analysis text (defaults to English)
*/

use sprout::ai::{EnvCredentials, PlantAi};
use sprout::cli::{CliArgs, Command};
use sprout::config::Config;
use sprout::constants::{DEFAULT_LOG_LEVEL, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME};
use sprout::errors::AppResult;
use sprout::journal::{JournalEntry, PlantAnalysis};
use sprout::ops::{self, GenerateOptions};
use sprout::store::JournalStore;
use std::process::ExitCode;
use tracing::{debug, error, info, info_span};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(&args);

    let correlation_id = uuid::Uuid::new_v4().to_string();
    let span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service_name = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = span.enter();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Logged once here; operations propagate without logging.
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(args: &CliArgs) {
    let default_level = if args.verbose { "debug" } else { DEFAULT_LOG_LEVEL };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    if args.json_logs() {
        builder
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .init();
    } else {
        builder.with_target(false).compact().init();
    }
}

fn run(args: CliArgs) -> AppResult<()> {
    debug!("CLI arguments: {:?}", args);

    info!("Loading configuration");
    let config = Config::load()?;
    config.validate()?;
    debug!("Configuration: {:?}", config);

    let store = JournalStore::open(&config.data_dir);
    let ai = PlantAi::new(config.ai.clone(), EnvCredentials);

    match args.command {
        Command::List { favorites } => {
            let entries = ops::list_entries(&store, favorites);
            if entries.is_empty() {
                println!("No journal entries yet.");
            }
            for entry in &entries {
                println!("{}", summary_line(entry));
            }
        }
        Command::Show { id } => {
            let entry = ops::show_entry(&store, &id)?;
            print_entry(&entry);
        }
        Command::Identify { image, save } => {
            let provider = ai.provider()?;
            let identified = ops::identify_photo(&store, provider.as_ref(), &image, save)?;
            print_analysis(&identified.analysis);
            if let Some(entry) = identified.entry {
                println!("\nSaved as entry {}", entry.id);
            }
        }
        Command::Generate {
            description,
            out,
            identify,
            save,
        } => {
            let provider = ai.provider()?;
            let options = GenerateOptions {
                out,
                identify,
                save,
            };
            let generated = ops::generate_plant(&store, provider.as_ref(), &description, &options)?;

            match &generated.written_to {
                Some(path) => println!("Image written to {}", path.display()),
                None => println!("{}", generated.image),
            }
            if let Some(analysis) = &generated.analysis {
                println!();
                print_analysis(analysis);
            }
            if let Some(entry) = &generated.entry {
                println!("\nSaved as entry {}", entry.id);
            }
        }
        Command::Favorite { id } => {
            let entry = ops::toggle_favorite(&store, &id)?;
            if entry.is_favorite {
                println!("{} is now a favorite", entry.analysis.common_name);
            } else {
                println!("{} is no longer a favorite", entry.analysis.common_name);
            }
        }
        Command::Note { id, text } => {
            let entry = ops::add_note(&store, &id, &text)?;
            println!(
                "Added note to {} ({} notes)",
                entry.analysis.common_name,
                entry.notes.len()
            );
        }
        Command::Delete { id } => {
            if ops::delete_entry(&store, &id)? {
                println!("Deleted entry {}", id);
            } else {
                println!("No journal entry with id {}", id);
            }
        }
    }

    Ok(())
}

fn summary_line(entry: &JournalEntry) -> String {
    format!(
        "{}  {} {} ({})  {}",
        entry.id,
        if entry.is_favorite { "*" } else { " " },
        entry.analysis.common_name,
        entry.analysis.scientific_name,
        entry.date_added.format("%Y-%m-%d")
    )
}

fn print_analysis(analysis: &PlantAnalysis) {
    println!("{} ({})", analysis.common_name, analysis.scientific_name);
    println!("{}", analysis.description);
    println!("Light:       {}", analysis.light_requirement);
    println!("Watering:    {}", analysis.watering_requirement);
    println!("Temperature: {}", analysis.temperature_range);
    println!("Toxicity:    {}", analysis.toxicity);
    println!("Difficulty:  {}", analysis.difficulty);
    for fact in &analysis.fun_facts {
        println!("- {}", fact);
    }
}

fn print_entry(entry: &JournalEntry) {
    println!("{}", summary_line(entry));
    println!();
    print_analysis(&entry.analysis);

    if !entry.notes.is_empty() {
        println!("\nNotes:");
        for note in &entry.notes {
            println!("  {}  {}", note.date.format("%Y-%m-%d %H:%M"), note.text);
        }
    }
}
