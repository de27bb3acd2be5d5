//! CLI entry point for the character-voice synthesis front-end.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use sekai_tts::{save_wav, speed_scale, CleanerBackend, ModelLoader, Session};

#[derive(Parser, Debug)]
#[command(name = "sekai-tts")]
#[command(about = "Character-voice VITS synthesis front-end")]
struct Args {
    /// Japanese text to synthesize
    #[arg(short, long)]
    text: String,

    /// Path to the hyperparameter JSON file
    #[arg(short, long)]
    config: PathBuf,

    /// Path to the model checkpoint
    #[arg(short, long)]
    model: PathBuf,

    /// Speaker label (one of the configuration's roster)
    #[arg(long)]
    speaker: Option<String>,

    /// Speed slider value, 50-200 (100 = normal speed)
    #[arg(short, long, default_value = "100")]
    speed: u32,

    /// Output WAV file path
    #[arg(short, long, default_value = "output.wav")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut session = build_session()?;

    println!("Loading configuration from {:?}...", args.config);
    session.load_config(&args.config)?;
    println!("Speakers: {:?}", session.speaker_labels());

    if let Some(ref speaker) = args.speaker {
        let index = session.select_speaker(speaker)?;
        println!("Selected speaker {:?} (id {})", speaker, index);
    }

    println!("Loading model from {:?}...", args.model);
    session.load_model(&args.model)?;

    println!("Synthesizing (speed={:.2})...", speed_scale(args.speed));
    let result = session.synthesize(&args.text, args.speed)?;

    println!("Saving audio to {:?}...", args.output);
    save_wav(&result.audio, &args.output, result.sample_rate).context("Failed to save WAV")?;

    let duration_secs = result.audio.len() as f32 / result.sample_rate as f32;
    println!("Done! Generated {:.2}s of audio.", duration_secs);

    Ok(())
}

fn build_session() -> Result<Session> {
    let cleaner: Box<dyn CleanerBackend> = {
        #[cfg(feature = "cleaner-jpreprocess")]
        {
            Box::new(sekai_tts::JPreprocessCleaner::new()?)
        }
        #[cfg(not(feature = "cleaner-jpreprocess"))]
        {
            Box::new(sekai_tts::DisabledCleanerBackend)
        }
    };

    let loader: Box<dyn ModelLoader> = {
        #[cfg(feature = "onnx")]
        {
            Box::new(sekai_tts::OnnxModelLoader)
        }
        #[cfg(not(feature = "onnx"))]
        {
            Box::new(sekai_tts::DisabledModelLoader)
        }
    };

    Ok(Session::with_backends(cleaner, loader))
}
