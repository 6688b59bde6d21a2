use anyhow::Context;
use clap::{Parser, Subcommand};
use hl7::{build_document, StudyDefinition, StudyDefinitionData};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use studydef_core::constants::DOCUMENT_DIR_ENV;
use studydef_core::{resolve_document_dir, CoreConfig, FileResourceStore, StudyDefinitionService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "studydef")]
#[command(about = "Study definition to HL7 Quality Measure Document tool")]
struct Cli {
    /// Document store directory (overrides STUDYDEF_DOCUMENT_DIR)
    #[arg(long, global = true)]
    document_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the Quality Measure Document for a study definition file
    Build {
        /// Study definition YAML file
        file: PathBuf,
    },
    /// Store a study definition file and print its id
    Persist {
        /// Study definition YAML file
        file: PathBuf,
    },
    /// Show a stored study definition
    Get {
        /// Study definition id (studydefinition_<document id>)
        id: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List stored study definitions
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("studydef=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let document_dir = match cli.document_dir {
        Some(dir) => dir,
        None => resolve_document_dir(std::env::var(DOCUMENT_DIR_ENV).ok()),
    };
    let cfg = CoreConfig::new(document_dir)?;
    let service = StudyDefinitionService::new(Arc::new(FileResourceStore::from_config(&cfg)));

    match cli.command {
        Some(Commands::Build { file }) => {
            let definition = read_definition(&file)?;
            let document = build_document(&definition)?;
            print!("{}", document.render_yaml()?);
        }
        Some(Commands::Persist { file }) => {
            let definition = read_definition(&file)?;
            let persisted = service.persist_study_definition(definition)?;
            match persisted.id() {
                Some(id) => println!("Persisted study definition with id: {id}"),
                None => anyhow::bail!("store returned no id"),
            }
        }
        Some(Commands::Get { id, json }) => {
            let view = service.get_study_definition(&id)?;
            if json {
                let data = StudyDefinitionData::from_view(&view);
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                print_definition(&view);
            }
        }
        Some(Commands::List { json }) => {
            let definitions = service.find_study_definitions()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&definitions)?);
            } else if definitions.is_empty() {
                println!("No study definitions found.");
            } else {
                for info in definitions {
                    println!("ID: {}, Title: {}", info.id, info.title);
                }
            }
        }
        None => {
            println!("Use 'studydef --help' for commands");
        }
    }

    Ok(())
}

fn read_definition(path: &Path) -> anyhow::Result<StudyDefinitionData> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_yaml::from_str(&contents)
        .with_context(|| format!("parsing study definition {}", path.display()))
}

fn print_definition<S: StudyDefinition + ?Sized>(definition: &S) {
    if let Some(id) = definition.id() {
        println!("ID: {id}");
    }
    println!("Name: {}", definition.name().unwrap_or_default());
    println!("Authors: {}", definition.authors().join(", "));
    println!("Items:");
    for item in definition.items() {
        match (item.code, item.code_system) {
            (Some(code), Some(code_system)) => {
                println!("  - {} [{code} @ {code_system}]", item.name)
            }
            _ => println!("  - {} [{}]", item.name, item.id),
        }
        if let Some(description) = item.description {
            println!("      {description}");
        }
    }
}
