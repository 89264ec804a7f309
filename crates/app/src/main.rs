use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{Clock, ImageEmbed, SubmissionPipeline, SurveyLoopService};
use storage::fs::{FsStimulusAssets, JsonRecordStore};
use storage::repository::{RecordSink, StimulusAssets, TabularSink};
use storage::sheets::{GoogleSheetsClient, ServiceAccountKey, UnconfiguredSheets};
use storage::sqlite::SqliteRepository;
use survey_core::model::{QuestionnaireVariant, StimulusSet};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_SHEET_NAME: &str = "Responses_qualitative_assessment";
const DEFAULT_RECORDS_DIR: &str = "responses";
const EXAMPLE_FRAME: &str = "frame_00379.png";
const EXAMPLE_CAPTION: &str = "Example Depth Maps from AI Models";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidVariant { raw: String },
    InvalidRecords { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidVariant { raw } => {
                write!(f, "invalid --variant value: {raw} (expected standard or extended)")
            }
            ArgsError::InvalidRecords { raw } => write!(f, "invalid --records value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    survey_loop: Arc<SurveyLoopService>,
    example_image: Option<ImageEmbed>,
}

impl UiApp for DesktopApp {
    fn survey_loop(&self) -> Arc<SurveyLoopService> {
        Arc::clone(&self.survey_loop)
    }

    fn example_image(&self) -> Option<ImageEmbed> {
        self.example_image.clone()
    }
}

/// Where submission records are kept locally.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RecordsTarget {
    Directory(PathBuf),
    Sqlite(String),
}

impl RecordsTarget {
    fn parse(raw: String) -> Result<Self, ArgsError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ArgsError::InvalidRecords { raw });
        }
        if trimmed.starts_with("sqlite:") {
            return Ok(Self::Sqlite(normalize_sqlite_url(trimmed)));
        }
        Ok(Self::Directory(PathBuf::from(trimmed)))
    }
}

#[derive(Debug)]
struct Args {
    variant: QuestionnaireVariant,
    assets: PathBuf,
    records: RecordsTarget,
    credentials: Option<PathBuf>,
    sheet_name: String,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [--variant standard|extended] [--assets <dir>] \
         [--records <dir|sqlite:path>] [--credentials <key.json|secrets.toml>] [--sheet <name>]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --variant standard");
    eprintln!("  --assets .");
    eprintln!("  --records {DEFAULT_RECORDS_DIR}");
    eprintln!("  --sheet {DEFAULT_SHEET_NAME}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!(
        "  SURVEY_VARIANT, SURVEY_ASSETS_DIR, SURVEY_RECORDS, SURVEY_CREDENTIALS, \
         SURVEY_SHEET_NAME, RUST_LOG"
    );
}

fn parse_variant(raw: String) -> Result<QuestionnaireVariant, ArgsError> {
    raw.parse()
        .map_err(|_| ArgsError::InvalidVariant { raw })
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut variant = match std::env::var("SURVEY_VARIANT") {
            Ok(raw) => parse_variant(raw)?,
            Err(_) => QuestionnaireVariant::default(),
        };
        let mut assets = std::env::var("SURVEY_ASSETS_DIR")
            .map_or_else(|_| PathBuf::from("."), PathBuf::from);
        let mut records = match std::env::var("SURVEY_RECORDS") {
            Ok(raw) => RecordsTarget::parse(raw)?,
            Err(_) => RecordsTarget::Directory(PathBuf::from(DEFAULT_RECORDS_DIR)),
        };
        let mut credentials = std::env::var("SURVEY_CREDENTIALS")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let mut sheet_name =
            std::env::var("SURVEY_SHEET_NAME").unwrap_or_else(|_| DEFAULT_SHEET_NAME.to_string());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--variant" => variant = parse_variant(require_value(args, "--variant")?)?,
                "--assets" => assets = PathBuf::from(require_value(args, "--assets")?),
                "--records" => records = RecordsTarget::parse(require_value(args, "--records")?)?,
                "--credentials" => {
                    credentials = Some(PathBuf::from(require_value(args, "--credentials")?));
                }
                "--sheet" => sheet_name = require_value(args, "--sheet")?,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            variant,
            assets,
            records,
            credentials,
            sheet_name,
        })
    }
}

fn normalize_sqlite_url(raw: &str) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw.to_string();
    }

    let path_str = raw.strip_prefix("sqlite:").unwrap_or(raw);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidRecords {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidRecords {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn open_records(target: &RecordsTarget) -> Result<Arc<dyn RecordSink>, Box<dyn std::error::Error>> {
    match target {
        RecordsTarget::Directory(dir) => {
            tracing::info!(dir = %dir.display(), "writing records as JSON files");
            Ok(Arc::new(JsonRecordStore::new(dir.clone())))
        }
        RecordsTarget::Sqlite(url) => {
            prepare_sqlite_file(url)?;
            let repo = SqliteRepository::open(url).await?;
            tracing::info!(url = %url, "writing records to SQLite");
            Ok(Arc::new(repo))
        }
    }
}

/// Credentials are optional; without them every sheet append reports an error.
fn open_sheets(
    credentials: Option<&Path>,
    clock: Clock,
) -> Result<Arc<dyn TabularSink>, Box<dyn std::error::Error>> {
    let Some(path) = credentials else {
        tracing::warn!("no service account credentials configured; sheet appends will fail");
        return Ok(Arc::new(UnconfiguredSheets));
    };
    let key = ServiceAccountKey::from_file(path)?;
    tracing::info!(client_email = %key.client_email, "loaded service account");
    Ok(Arc::new(GoogleSheetsClient::new(Arc::new(key)).with_clock(clock)))
}

fn load_example_image(assets: &Path) -> Option<ImageEmbed> {
    let path = assets.join(EXAMPLE_FRAME);
    match std::fs::read(&path) {
        Ok(bytes) => Some(ImageEmbed::from_png(&bytes, EXAMPLE_CAPTION)),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "example frame unavailable");
            None
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    tracing::debug!(?parsed, "resolved configuration");

    let clock = Clock::system();
    let records = open_records(&parsed.records).await?;
    let sheets = open_sheets(parsed.credentials.as_deref(), clock)?;
    let assets: Arc<dyn StimulusAssets> = Arc::new(FsStimulusAssets::new(parsed.assets.clone()));

    let pipeline = SubmissionPipeline::new(clock, parsed.variant, records, sheets, parsed.sheet_name);
    let survey_loop = Arc::new(SurveyLoopService::new(
        parsed.variant,
        StimulusSet::colonoscopy_default(),
        assets,
        pipeline,
    ));

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        survey_loop,
        example_image: load_example_image(&parsed.assets),
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Depth Estimation Assessment")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_target_distinguishes_sqlite_urls() {
        assert_eq!(
            RecordsTarget::parse("responses".into()).unwrap(),
            RecordsTarget::Directory(PathBuf::from("responses"))
        );
        assert_eq!(
            RecordsTarget::parse("sqlite://tmp/r.db".into()).unwrap(),
            RecordsTarget::Sqlite("sqlite://tmp/r.db".into())
        );
        assert!(matches!(
            RecordsTarget::parse("  ".into()),
            Err(ArgsError::InvalidRecords { .. })
        ));
    }

    #[test]
    fn flags_override_defaults() {
        let mut args = [
            "--variant",
            "extended",
            "--sheet",
            "Pilot",
            "--credentials",
            "secrets.toml",
        ]
        .into_iter()
        .map(String::from);
        let parsed = Args::parse(&mut args).unwrap();
        assert_eq!(parsed.variant, QuestionnaireVariant::Extended);
        assert_eq!(parsed.sheet_name, "Pilot");
        assert_eq!(parsed.credentials, Some(PathBuf::from("secrets.toml")));
    }

    #[test]
    fn bad_flags_are_reported() {
        let mut missing = ["--assets".to_string()].into_iter();
        assert!(matches!(
            Args::parse(&mut missing),
            Err(ArgsError::MissingValue { flag: "--assets" })
        ));

        let mut unknown = ["--deck".to_string()].into_iter();
        assert!(matches!(Args::parse(&mut unknown), Err(ArgsError::UnknownArg(_))));

        let mut variant = ["--variant".to_string(), "long".to_string()].into_iter();
        assert!(matches!(
            Args::parse(&mut variant),
            Err(ArgsError::InvalidVariant { .. })
        ));
    }
}
