//! `folio-admin` Command Line
//!
//! Scriptable access to the same stores the web front-end uses. Every
//! command prints its result as pretty JSON on stdout.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::api::{ApiClient, ApiError, ContactMessage, CredentialStore, FileCredentials, ReqwestTransport};
use crate::config::{ClientConfig, ConfigError};
use crate::domain::{RecordDraft, RecordPatch, ValidationError};
use crate::retry::TokioDelay;
use crate::store::{CollectionSchema, CollectionStore, FetchQuery, GallerySchema, ProjectSchema, StoreError};
use crate::upload::{ImageFile, UploadError};

const APP_NAME: &str = "folio-admin";

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error("{}", .0.message)]
    Validation(#[from] ValidationError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Usage(String),
}

#[derive(Debug, Parser)]
#[command(name = "folio-admin", version)]
#[command(about = "Manage portfolio projects and gallery items")]
#[command(after_help = "Environment:\n  FOLIO_API_URL   Backend base URL override")]
pub struct Cli {
    /// Config file (JSON); defaults to <data-dir>/config.json
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Backend base URL, overriding config and environment
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Where credentials and logs are kept
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    Projects,
    Gallery,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check that the backend is reachable
    Health,
    /// Store an admin token for mutating commands
    Login {
        #[arg(long)]
        token: String,
    },
    /// Forget the stored token
    Logout,
    List {
        #[arg(value_enum)]
        kind: Kind,
        #[command(flatten)]
        filters: FilterArgs,
    },
    Add {
        #[arg(value_enum)]
        kind: Kind,
        #[arg(long)]
        title: String,
        #[arg(long)]
        image: PathBuf,
        #[command(flatten)]
        fields: FieldArgs,
    },
    Update {
        #[arg(value_enum)]
        kind: Kind,
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        image: Option<PathBuf>,
        #[command(flatten)]
        fields: FieldArgs,
    },
    Delete {
        #[arg(value_enum)]
        kind: Kind,
        id: String,
    },
    /// Remove every record of a kind
    DeleteAll {
        #[arg(value_enum)]
        kind: Kind,
        /// Required confirmation
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    /// Send a message through the contact form endpoint
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        message: String,
    },
}

#[derive(Debug, Clone, Default, Args)]
struct FilterArgs {
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    section: Option<String>,
    #[arg(long)]
    year: Option<String>,
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    limit: Option<u32>,
}

impl From<FilterArgs> for FetchQuery {
    fn from(args: FilterArgs) -> Self {
        FetchQuery {
            category: args.category,
            section: args.section,
            year: args.year,
            search: args.search,
            page: args.page,
            limit: args.limit,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
struct FieldArgs {
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    section: Option<String>,
    #[arg(long)]
    year: Option<String>,
    /// Projects only
    #[arg(long)]
    completed: Option<bool>,
}

impl FieldArgs {
    fn into_draft(self, title: String, image: ImageFile) -> RecordDraft {
        RecordDraft {
            title,
            description: self.description.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            section: self.section.unwrap_or_default(),
            completed: self.completed.unwrap_or(false),
            year: self.year.unwrap_or_default(),
            image: Some(image),
        }
    }

    fn into_patch(self, title: Option<String>, image: Option<ImageFile>) -> RecordPatch {
        RecordPatch {
            title,
            description: self.description,
            category: self.category,
            section: self.section,
            completed: self.completed,
            year: self.year,
            image,
        }
    }
}

/// Collection operations, independent of the record kind
enum Action {
    List(FetchQuery),
    Add(RecordDraft),
    Update(String, RecordPatch),
    Delete(String),
    DeleteAll,
}

struct Context {
    client: Arc<ApiClient>,
    credentials: Arc<FileCredentials>,
}

/// Parse arguments, run one command and return the process exit code
pub fn run() -> i32 {
    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir.as_deref());

    if let Err(e) = rolling_logger::init_logger(data_dir.join("logs"), APP_NAME) {
        eprintln!("warning: file logging disabled: {}", e);
    }

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: failed to start runtime: {}", e);
            return 1;
        }
    };

    match runtime.block_on(execute(cli, &data_dir)) {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(text) => {
                println!("{}", text);
                0
            }
            Err(e) => {
                eprintln!("error: {}", e);
                1
            }
        },
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            1
        }
    }
}

fn resolve_data_dir(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(dir) => dir.to_path_buf(),
        None => dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME),
    }
}

fn build_context(cli: &Cli, data_dir: &Path) -> Result<Context, CliError> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| data_dir.join("config.json"));
    let mut config = ClientConfig::load(&config_path)?;
    if let Some(url) = &cli.api_url {
        config.api_base_url = url.trim().to_string();
        config.validate()?;
    }
    log::info!("Using backend {}", config.origin());

    let credentials = Arc::new(FileCredentials::new(data_dir.join("credentials.json")));
    let client = Arc::new(ApiClient::new(
        config,
        Arc::new(ReqwestTransport::new()),
        credentials.clone(),
    ));
    Ok(Context { client, credentials })
}

async fn execute(cli: Cli, data_dir: &Path) -> Result<Value, CliError> {
    let ctx = build_context(&cli, data_dir)?;

    let (kind, action) = match cli.command {
        Command::Health => return Ok(ctx.client.health().await?),
        Command::Login { token } => {
            let token = token.trim();
            if token.is_empty() {
                return Err(CliError::Usage("token must not be empty".to_string()));
            }
            ctx.credentials.set_token(token)?;
            log::info!("Stored admin token");
            return Ok(json!({ "authenticated": true }));
        }
        Command::Logout => {
            ctx.credentials.clear();
            return Ok(json!({ "authenticated": false }));
        }
        Command::Contact {
            name,
            email,
            subject,
            message,
        } => {
            let mut contact = ContactMessage::new(name, email, message);
            if let Some(subject) = subject {
                contact = contact.with_subject(subject);
            }
            contact.validate()?;
            return Ok(ctx.client.submit_contact(&contact).await?);
        }
        Command::List { kind, filters } => (kind, Action::List(filters.into())),
        Command::Add {
            kind,
            title,
            image,
            fields,
        } => {
            let image = ImageFile::from_path(&image)?;
            (kind, Action::Add(fields.into_draft(title, image)))
        }
        Command::Update {
            kind,
            id,
            title,
            image,
            fields,
        } => {
            let image = image.as_deref().map(ImageFile::from_path).transpose()?;
            (kind, Action::Update(id, fields.into_patch(title, image)))
        }
        Command::Delete { kind, id } => (kind, Action::Delete(id)),
        Command::DeleteAll { kind, yes } => {
            if !yes {
                return Err(CliError::Usage(
                    "delete-all removes every record; pass --yes to confirm".to_string(),
                ));
            }
            (kind, Action::DeleteAll)
        }
    };

    match kind {
        Kind::Projects => apply::<ProjectSchema>(&ctx, action).await,
        Kind::Gallery => apply::<GallerySchema>(&ctx, action).await,
    }
}

async fn apply<S>(ctx: &Context, action: Action) -> Result<Value, CliError>
where
    S: CollectionSchema,
    S::Record: Serialize,
{
    let store = CollectionStore::<S>::new(ctx.client.clone(), Arc::new(TokioDelay));
    let value = match action {
        Action::List(query) => {
            store.fetch(query).await?;
            let state = store.snapshot();
            json!({ "items": state.items, "pagination": state.pagination })
        }
        Action::Add(draft) => {
            let created = store.add(draft).await?;
            json!({ "created": created })
        }
        Action::Update(id, patch) => {
            let updated = store.update(&id, patch).await?;
            json!({ "updated": updated })
        }
        Action::Delete(id) => {
            store.delete(&id).await?;
            json!({ "deleted": id })
        }
        Action::DeleteAll => {
            store.delete_all().await?;
            json!({ "deleted": "all", "kind": S::LABEL })
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_with_filters() {
        let cli = Cli::try_parse_from([
            "folio-admin", "list", "gallery", "--category", "events", "--page", "2",
        ])
        .unwrap();
        match cli.command {
            Command::List { kind, filters } => {
                assert_eq!(kind, Kind::Gallery);
                let query: FetchQuery = filters.into();
                assert_eq!(query, FetchQuery::new().category("events").page(2));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "folio-admin", "health", "--api-url", "https://api.example.com", "--data-dir", "/tmp/folio",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/folio")));
    }

    #[test]
    fn test_add_requires_title_and_image() {
        assert!(Cli::try_parse_from(["folio-admin", "add", "projects", "--title", "x"]).is_err());
        assert!(Cli::try_parse_from(["folio-admin", "add", "movies", "--title", "x", "--image", "a.png"]).is_err());
    }

    #[test]
    fn test_update_builds_patch_from_given_flags() {
        let cli = Cli::try_parse_from([
            "folio-admin", "update", "projects", "p1", "--section", "Featured", "--completed", "true",
        ])
        .unwrap();
        match cli.command {
            Command::Update { id, title, fields, .. } => {
                assert_eq!(id, "p1");
                let patch = fields.into_patch(title, None);
                assert_eq!(patch.section.as_deref(), Some("Featured"));
                assert_eq!(patch.completed, Some(true));
                assert!(patch.title.is_none() && patch.category.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_all_needs_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from(["folio-admin", "delete-all", "gallery"]).unwrap();
        let err = execute(cli, dir.path()).await.unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
    }

    #[tokio::test]
    async fn test_login_and_logout_persist_token() {
        let dir = tempfile::tempdir().unwrap();
        let login = Cli::try_parse_from(["folio-admin", "login", "--token", "secret"]).unwrap();
        execute(login, dir.path()).await.unwrap();
        let stored = FileCredentials::new(dir.path().join("credentials.json"));
        assert_eq!(stored.token().as_deref(), Some("secret"));

        let logout = Cli::try_parse_from(["folio-admin", "logout"]).unwrap();
        execute(logout, dir.path()).await.unwrap();
        assert_eq!(stored.token(), None);
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        assert_eq!(resolve_data_dir(Some(Path::new("/srv/folio"))), PathBuf::from("/srv/folio"));
    }
}
