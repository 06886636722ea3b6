use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use stroke_risk::form::{Form, run_session};
use stroke_risk::{ArtifactPaths, StrokePredictor, predict_csv_file};

#[derive(Parser)]
#[command(name = "stroke-risk", about = "Stroke risk prediction from patient attributes")]
struct Cli {
    /// Directory holding model.msgpack, label_encoders.msgpack and scaler.msgpack.
    #[arg(long, env = "STROKE_ARTIFACTS_DIR", default_value = ".")]
    artifacts_dir: PathBuf,

    /// Classifier artifact (overrides the artifacts directory).
    #[arg(long, env = "STROKE_MODEL")]
    model: Option<PathBuf>,

    /// Label encoder artifact (overrides the artifacts directory).
    #[arg(long, env = "STROKE_ENCODERS")]
    encoders: Option<PathBuf>,

    /// Scaler artifact (overrides the artifacts directory).
    #[arg(long, env = "STROKE_SCALER")]
    scaler: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Fill in the patient form on the terminal (default).
    Interactive,
    /// Score every record of a CSV file.
    Batch {
        /// CSV with one raw record per row, headed by the feature names.
        csv: PathBuf,
    },
}

impl Cli {
    fn artifact_paths(&self) -> ArtifactPaths {
        let defaults = ArtifactPaths::in_dir(&self.artifacts_dir);
        ArtifactPaths {
            model: self.model.clone().unwrap_or(defaults.model),
            encoders: self.encoders.clone().unwrap_or(defaults.encoders),
            scaler: self.scaler.clone().unwrap_or(defaults.scaler),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let paths = cli.artifact_paths();
    let predictor = StrokePredictor::load(&paths)
        .with_context(|| format!("cannot serve predictions without artifacts ({paths})"))?;

    let stdout = io::stdout();
    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => {
            println!("🧠 Stroke Risk Prediction");
            println!("Enter the following details to predict stroke risk.\n");
            let mut form = Form::new(io::stdin().lock(), stdout.lock());
            let shown = run_session(&predictor, &mut form)?;
            log::info!("👋 Session ended after {shown} predictions");
        }
        Command::Batch { csv } => {
            let mut out = stdout.lock();
            predict_csv_file(&predictor, &csv, &mut out)
                .with_context(|| format!("batch scoring of {csv:?} failed"))?;
            out.flush()?;
        }
    }
    Ok(())
}
