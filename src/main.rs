use std::{fs, io, path::PathBuf, process};

use clap::Parser;
use ocr_erl::{
    config::Config,
    interpreter::{evaluator::core::Context, host::StdioHost},
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// erl runs programs written in a small imperative teaching language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells erl to read the program from the file named by CONTENTS.
    #[arg(short, long)]
    file: bool,

    /// Text files to place in file storage before the run, under their file
    /// names. Can be repeated.
    #[arg(short, long = "data", value_name = "PATH")]
    data: Vec<PathBuf>,

    /// Loop iterations between cooperative yields.
    #[arg(long, value_name = "N")]
    yield_interval: Option<usize>,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let source = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            process::exit(1);
        })
    } else {
        args.contents.clone()
    };

    process::exit(run(&args, &source));
}

fn run(args: &Args, source: &str) -> i32 {
    let mut config = Config::default();
    if let Some(iterations) = args.yield_interval {
        config = config.with_yield_interval(iterations);
    }

    let mut context = Context::with_config(StdioHost::default(), config);
    for path in &args.data {
        let name = path.file_name().map(|name| name.to_string_lossy().into_owned());
        match (name, fs::read_to_string(path)) {
            (Some(name), Ok(contents)) => {
                context.files_mut().force_add_new(&name, &contents);
            },
            (_, Err(error)) => warn!(path = %path.display(), %error, "could not load data file"),
            (None, Ok(_)) => warn!(path = %path.display(), "data path has no file name"),
        }
    }

    context.run(source)
}
