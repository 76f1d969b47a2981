//! Replays a recorded stroke, prints its feature vector and optionally asks
//! the prediction service for a label.
//!
//! cargo run --example predict -- demos/l_shape.ron --model rf --send

use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use stroke_features::{
    client::PredictionClient, GestureClassifier, ModelKind, RawPoint, Settings, StrokeRecorder,
    VisualEffect,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "predict", about = "Encode a stroke and classify it")]
struct Cli {
    /// RON file with the samples of one stroke: [(x: 0.0, y: 0.0, t: 0.0), ...]
    stroke: PathBuf,

    /// Model to encode for: knn, rf or svm
    #[arg(short, long)]
    model: Option<ModelKind>,

    /// RON settings file; defaults plus environment overrides otherwise
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Post the vector to the prediction service
    #[arg(long)]
    send: bool,

    /// Enable debug output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let settings = match &cli.settings {
        Some(path) => Settings::load(path)?.with_env_overrides()?,
        None => Settings::from_env()?,
    };
    let model = cli.model.unwrap_or(settings.model);

    let text = fs::read_to_string(&cli.stroke)
        .with_context(|| format!("failed to read stroke {}", cli.stroke.display()))?;
    let samples: Vec<RawPoint> = ron::from_str(&text).context("failed to parse stroke")?;

    // feed the samples through the same lifecycle pointer events would
    let mut recorder = StrokeRecorder::new();
    let mut samples = samples.into_iter();
    if let Some(first) = samples.next() {
        recorder.begin(first);
    }
    for sample in samples {
        recorder.extend(sample);
    }
    let stroke = recorder.finish().context("stroke file holds no samples")?;
    info!(
        points = stroke.len(),
        duration = stroke.duration(),
        %model,
        "loaded stroke"
    );

    let classifier = GestureClassifier::new(
        PredictionClient::from_settings(&settings),
        model,
        settings.encoder,
    );

    match classifier.encode(&stroke) {
        Ok(features) => println!(
            "{model} features ({}): {:?}",
            features.len(),
            features.as_slice()
        ),
        Err(err) => {
            println!("Invalid gesture. Not enough data points or no movement. ({err})");
            return Ok(());
        }
    }

    if cli.send {
        match classifier.classify(&stroke).await {
            Ok(label) => {
                let mut effect = VisualEffect::new();
                effect.apply(&label);
                println!("Prediction: {label}");
                println!("filter: {:?}", effect.css_filter());
            }
            Err(err) => println!("{} ({err})", err.user_message()),
        }
    }
    Ok(())
}
