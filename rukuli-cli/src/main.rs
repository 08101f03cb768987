use clap::{Parser, Subcommand};
use rukuli::image::io::load_gray_image;
use rukuli::{
    match_template, Match, MatchOutcome, MouseButton, PrimaryScreen, Session, Template,
    WaitOutcome, DEFAULT_THRESHOLD,
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Find a template image on screen and act on it")]
struct Cli {
    /// Enable tracing output on stderr.
    #[arg(long, global = true)]
    trace: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Match a template against a screenshot file (no display needed).
    Find {
        /// Path to the screenshot image.
        #[arg(short, long, value_name = "FILE")]
        screenshot: PathBuf,
        /// Path to the template image.
        #[arg(short, long, value_name = "FILE")]
        template: PathBuf,
        /// Match threshold in [0, 1].
        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f32,
    },
    /// Check once whether a template is currently visible on screen.
    Exists {
        #[arg(short, long, value_name = "FILE")]
        template: PathBuf,
        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f32,
    },
    /// Wait up to a deadline for a template to appear on screen.
    Wait {
        #[arg(short, long, value_name = "FILE")]
        template: PathBuf,
        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f32,
        /// Seconds to keep retrying; 0 means a single attempt.
        #[arg(long, default_value_t = 0.0)]
        timeout_secs: f64,
    },
    /// Wait for a template and click its center.
    Click {
        #[arg(short, long, value_name = "FILE")]
        template: PathBuf,
        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f32,
        #[arg(long, default_value_t = 0.0)]
        timeout_secs: f64,
        /// Mouse button: left, right, or middle.
        #[arg(long, default_value = "left")]
        button: String,
    },
    /// Type a string through the platform input facility.
    Type {
        /// Text to type.
        text: String,
    },
    /// Tap a key by name (e.g. "return", "esc", "a").
    Tap {
        /// Key name.
        key: String,
    },
}

#[derive(Debug, Serialize)]
struct MatchRecord {
    x: u32,
    y: u32,
    score: f32,
}

impl From<Match> for MatchRecord {
    fn from(value: Match) -> Self {
        Self {
            x: value.x,
            y: value.y,
            score: value.score,
        }
    }
}

#[derive(Debug, Serialize)]
struct Report {
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    best: Option<MatchRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attempts: Option<u32>,
}

impl Report {
    fn from_outcome(outcome: MatchOutcome) -> Self {
        Self {
            found: outcome.is_found(),
            best: outcome.found().map(MatchRecord::from),
            attempts: None,
        }
    }

    fn from_wait(outcome: WaitOutcome) -> Self {
        match outcome {
            WaitOutcome::Found(m) => Self {
                found: true,
                best: Some(m.into()),
                attempts: None,
            },
            WaitOutcome::TimedOut { attempts, .. } => Self {
                found: false,
                best: None,
                attempts: Some(attempts),
            },
        }
    }

    fn print(&self) -> Result<(), Box<dyn std::error::Error>> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

fn seconds(value: f64) -> Duration {
    Duration::from_secs_f64(value.max(0.0))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("rukuli=info".parse()?))
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Command::Find {
            screenshot,
            template,
            threshold,
        } => {
            let image = load_gray_image(&screenshot)?;
            let template = Template::from_path(&template)?;
            let outcome = match_template(image.view(), &template, threshold)?;
            Report::from_outcome(outcome).print()?;
        }
        Command::Exists {
            template,
            threshold,
        } => {
            let template = Template::from_path(&template)?;
            let matcher = rukuli::Matcher::new(&template)?.with_threshold(threshold)?;
            let mut screen = PrimaryScreen::open()?;
            let outcome = rukuli::exists_now(&mut screen, &matcher)?;
            Report::from_outcome(outcome).print()?;
        }
        Command::Wait {
            template,
            threshold,
            timeout_secs,
        } => {
            let template = Template::from_path(&template)?;
            let matcher = rukuli::Matcher::new(&template)?.with_threshold(threshold)?;
            let mut screen = PrimaryScreen::open()?;
            let outcome = rukuli::wait_for_match(&mut screen, &matcher, seconds(timeout_secs))?;
            Report::from_wait(outcome).print()?;
        }
        Command::Click {
            template,
            threshold,
            timeout_secs,
            button,
        } => {
            let button: MouseButton = button.parse()?;
            let dir = template
                .parent()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            let name = template
                .file_name()
                .ok_or("template path has no file name")?
                .to_string_lossy()
                .into_owned();
            let mut session = Session::new()?
                .with_template_dir(dir)
                .with_threshold(threshold)?;
            let m = session.click(&name, seconds(timeout_secs), button)?;
            Report {
                found: true,
                best: Some(m.into()),
                attempts: None,
            }
            .print()?;
        }
        Command::Type { text } => {
            let mut session = Session::new()?;
            session.type_text(&text)?;
        }
        Command::Tap { key } => {
            let mut session = Session::new()?;
            session.tap_key(&key)?;
        }
    }

    Ok(())
}
