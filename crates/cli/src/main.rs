use api_shared::{clean_csv, clean_field_id, ConvertResult, JiraField};
use clap::{Args, Parser, Subcommand, ValueEnum};
use docstory_core::{parse_story, ParseOptions, Settings};
use docstory_extract::TextExtractor;
use docstory_tracker::{CustomFieldIds, JiraClient, TrackerConfig};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "docstory")]
#[command(about = "Turn story documents into Jira issues")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and print the story
    Convert {
        #[command(flatten)]
        input: DocumentArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        /// Also print the extracted text and diagnostics
        #[arg(long)]
        raw: bool,
    },
    /// Parse a document and create the story in Jira
    Create {
        #[command(flatten)]
        input: DocumentArgs,
        /// Issue type name (defaults to DEFAULT_ISSUETYPE)
        #[arg(long)]
        issue_type: Option<String>,
        /// Custom field id for story points, e.g. customfield_10016
        #[arg(long)]
        story_points_field: Option<String>,
        /// Custom field id for the epic link, e.g. customfield_10014
        #[arg(long)]
        epic_link_field: Option<String>,
        /// Custom field id for the epic name (Epic issues only)
        #[arg(long)]
        epic_name_field: Option<String>,
    },
    /// List Jira fields (useful to find custom field ids)
    Fields,
    /// List the issue types a Jira project accepts
    IssueTypes {
        /// Jira project key
        project_key: String,
    },
}

#[derive(Args)]
struct DocumentArgs {
    /// Document to read (PDF, DOCX, Markdown, TXT, HTML or an image)
    path: PathBuf,
    /// Jira project key
    #[arg(long)]
    project: String,
    /// Default labels (comma-separated)
    #[arg(long)]
    labels: Option<String>,
    /// Default components (comma-separated)
    #[arg(long)]
    components: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

fn render<T: Serialize>(
    value: &T,
    format: OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    })
}

fn convert_file(
    settings: &Settings,
    input: &DocumentArgs,
) -> Result<ConvertResult, Box<dyn std::error::Error>> {
    let bytes = std::fs::read(&input.path)?;
    let filename = input
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let raw = TextExtractor::from_settings(settings).extract(&filename, &bytes);
    let placeholder = &settings.ignore_placeholder_literal;
    let labels = clean_csv(input.labels.as_deref(), placeholder);
    let components = clean_csv(input.components.as_deref(), placeholder);
    let options = ParseOptions::default().with_max_chars(settings.max_text_chars);

    let parsed = parse_story(&raw, &input.project, &labels, &components, &options);
    Ok(ConvertResult::new(parsed, raw))
}

fn tracker(settings: &Settings) -> Result<JiraClient, Box<dyn std::error::Error>> {
    Ok(JiraClient::new(TrackerConfig::from_settings(settings)?)?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("docstory=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    match cli.command {
        Some(Commands::Convert { input, format, raw }) => match convert_file(&settings, &input) {
            Ok(result) if raw => println!("{}", render(&result, format)?),
            Ok(result) => println!("{}", render(&result.story, format)?),
            Err(e) => eprintln!("Error converting {}: {}", input.path.display(), e),
        },
        Some(Commands::Create {
            input,
            issue_type,
            story_points_field,
            epic_link_field,
            epic_name_field,
        }) => {
            let placeholder = settings.ignore_placeholder_literal.as_str();
            let custom_fields = CustomFieldIds {
                story_points: clean_field_id(story_points_field.as_deref(), placeholder),
                epic_link: clean_field_id(epic_link_field.as_deref(), placeholder),
                epic_name: clean_field_id(epic_name_field.as_deref(), placeholder),
            };
            let issue_type = issue_type.unwrap_or_else(|| settings.default_issuetype.clone());

            let client = tracker(&settings)?;
            let story = convert_file(&settings, &input)?.story.with_issue_type(issue_type);
            match client.create_issue(&story, &custom_fields).await {
                Ok(created) => println!("Created {} ({})", created.key, created.self_url),
                Err(e) => eprintln!("Error creating issue: {}", e),
            }
        }
        Some(Commands::Fields) => match tracker(&settings)?.list_fields().await {
            Ok(fields) => {
                for field in fields.into_iter().map(JiraField::from) {
                    println!("{}\t{}", field.id, field.name);
                }
            }
            Err(e) => eprintln!("Error listing fields: {}", e),
        },
        Some(Commands::IssueTypes { project_key }) => {
            match tracker(&settings)?.list_project_issue_types(&project_key).await {
                Ok(names) if names.is_empty() => {
                    println!("No issue types found for {}.", project_key)
                }
                Ok(names) => {
                    for name in names {
                        println!("{}", name);
                    }
                }
                Err(e) => eprintln!("Error listing issue types: {}", e),
            }
        }
        None => {
            println!("Use 'docstory --help' for commands");
        }
    }

    Ok(())
}
