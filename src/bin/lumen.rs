use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use lumen::{
    Effector, EffectorSpec, ImageFormat, LumenError, Pipeline, RowThreading, format_for_path,
    parse_chain_json, parse_effector,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lumen", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load an image, run an effector chain over it and save the result.
    Apply(ApplyArgs),
    /// List supported image formats and their extensions.
    Formats,
}

#[derive(Parser, Debug)]
struct ApplyArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output image; its extension picks the encoder.
    #[arg(long)]
    out: PathBuf,

    /// JSON array of effector specs, e.g. '[{"kind":"grayscale"}]'.
    #[arg(long)]
    chain: Option<String>,

    /// Effector shorthand `kind` or `kind:{json}`, applied after `--chain`. Repeatable.
    #[arg(long = "fx")]
    fx: Vec<String>,

    /// Worker threads for kernel effectors (defaults to the global rayon pool).
    #[arg(long)]
    threads: Option<usize>,

    /// Run kernel effectors on the calling thread only.
    #[arg(long, conflicts_with = "threads")]
    sequential: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Apply(args) => cmd_apply(args),
        Command::Formats => {
            cmd_formats();
            Ok(())
        }
    }
}

fn cmd_apply(args: ApplyArgs) -> anyhow::Result<()> {
    let threading = if args.sequential {
        RowThreading::sequential()
    } else {
        match args.threads {
            Some(n) => RowThreading::with_threads(n),
            None => RowThreading::default(),
        }
    };

    let mut effectors = match &args.chain {
        Some(json) => parse_chain_json(json).context("parse --chain")?,
        None => Vec::new(),
    };
    for s in &args.fx {
        let spec = EffectorSpec::from_shorthand(s).with_context(|| format!("parse --fx '{s}'"))?;
        effectors.push(parse_effector(&spec).with_context(|| format!("parse --fx '{s}'"))?);
    }
    let effectors = effectors
        .into_iter()
        .map(|e| e.with_row_threading(threading.clone()))
        .collect::<Result<Vec<Effector>, _>>()
        .context("configure kernel threads")?;

    let out_format = format_for_path(&args.out)?;
    let mut pipeline = Pipeline::new();
    let result = run_pipeline(&mut pipeline, &args, effectors, out_format);
    if let Err(e) = &result {
        report(e, pipeline.error_pos());
    }
    result?;

    eprintln!(
        "wrote {} ({} effectors)",
        args.out.display(),
        pipeline.effectors().len()
    );
    Ok(())
}

fn run_pipeline(
    pipeline: &mut Pipeline,
    args: &ApplyArgs,
    effectors: Vec<Effector>,
    out_format: ImageFormat,
) -> Result<(), LumenError> {
    pipeline.load_image(&args.in_path)?;
    pipeline.chain(effectors)?;
    pipeline.run()?;

    let mut out = pipeline.image()?.clone();
    out.set_format(out_format);
    pipeline.load_buffer(out);
    pipeline.save(&args.out)
}

fn report(e: &LumenError, error_pos: Option<usize>) {
    if let Some(pos) = error_pos {
        eprintln!("failed at effector position {pos}");
    }
    if let Some(hint) = e.suggestion() {
        eprintln!("hint: {hint}");
    }
}

fn cmd_formats() {
    for format in ImageFormat::all() {
        println!("{format}: {}", format.extensions().join(", "));
    }
}
