//! Lemmatizes a review record set and splits it into pro and con sets.
//!
//! ## Input
//!
//! `<data-dir>/<input>.jsonl`: one JSON object per line with at least
//! `review_text` and `pro_or_con`.
//!
//! ## Output
//!
//! `<data-dir>/<pro-output>.jsonl` and `<data-dir>/<con-output>.jsonl`: the
//! input records with a `lemmatized_text` field added, split by label.
//!
//! ## Usage
//!
//! ```sh
//! cargo run --release --bin lemmatize-reviews
//! cargo run --release --bin lemmatize-reviews -- --data-dir data --workers 4
//! RUST_LOG=debug cargo run --release --bin lemmatize-reviews -- --isolate-failures
//! ```

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use lemmata_core::{pipeline, FailurePolicy, PipelineConfig, StopList, UnknownLabelPolicy};

#[derive(Parser, Debug)]
#[command(about = "Lemmatize review text and split records into pro and con sets")]
struct Args {
    /// Directory holding the input and output `.jsonl` files.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Key of the input record set.
    #[arg(long, default_value = "ratings_df_all")]
    input: String,

    /// Key the `pro` records are saved under.
    #[arg(long, default_value = "pros_df")]
    pro_output: String,

    /// Key the `con` records are saved under.
    #[arg(long, default_value = "cons_df")]
    con_output: String,

    /// Worker count. Defaults to available parallelism minus one.
    #[arg(long)]
    workers: Option<usize>,

    /// Leave texts that fail to annotate empty instead of aborting.
    #[arg(long, default_value_t = false)]
    isolate_failures: bool,

    /// Fail on `pro_or_con` values other than "pro" and "con" instead of
    /// dropping those records.
    #[arg(long, default_value_t = false)]
    reject_unknown_labels: bool,

    /// Use NLTK's English stop list instead of the default one.
    #[arg(long, default_value_t = false)]
    nltk_stop_words: bool,
}

impl From<Args> for PipelineConfig {
    fn from(args: Args) -> Self {
        Self {
            data_dir: args.data_dir,
            input_key: args.input,
            pro_key: args.pro_output,
            con_key: args.con_output,
            workers: args.workers,
            failure_policy: if args.isolate_failures {
                FailurePolicy::Isolate
            } else {
                FailurePolicy::Abort
            },
            unknown_labels: if args.reject_unknown_labels {
                UnknownLabelPolicy::Reject
            } else {
                UnknownLabelPolicy::Drop
            },
            stop_list: if args.nltk_stop_words {
                StopList::Nltk
            } else {
                StopList::English
            },
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = PipelineConfig::from(Args::parse());
    info!("Data dir: {}", config.data_dir.display());
    info!("Input:    {}", config.input_key);
    info!("Outputs:  {} / {}", config.pro_key, config.con_key);

    // The summary is logged by the pipeline itself.
    pipeline::run(&config).map(drop).map_err(|e| {
        error!("{e}");
        e.into()
    })
}
