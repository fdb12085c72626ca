use crate::utils::parser;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "relabel - rewrite predicted TCR:pMHC structures into two chains (A = MHC + peptide, B = TCRα + TCRβ).",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used for batch runs.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split one structure into chains A and B using declared segment lengths.
    Segment(SegmentArgs),
    /// Split every structure in a directory, pairing each with its targets file.
    SegmentBatch(SegmentBatchArgs),
    /// Collapse chain identifiers through a substitution table if every required chain is present.
    Remap(RemapArgs),
}

/// Arguments for the `segment` subcommand.
#[derive(Args, Debug)]
pub struct SegmentArgs {
    /// Input PDB file to relabel.
    #[arg(short, long = "pdb-file", required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Output path for the relabeled PDB file. Left untouched if it already exists.
    #[arg(short, long = "output-file", required = true, value_name = "PATH")]
    pub output: PathBuf,

    #[command(flatten)]
    pub plan: PlanSource,
}

/// Where the four segment lengths come from; exactly one must be given.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct PlanSource {
    /// Targets TSV whose first row holds `target_chainseq` (MHC/PEPTIDE/TCRA/TCRB).
    #[arg(short, long = "targets-tsv", value_name = "PATH")]
    pub targets_tsv: Option<PathBuf>,

    /// Segment lengths given directly, in order MHC,PEPTIDE,TCRA,TCRB.
    #[arg(short, long, value_name = "MHC,PEP,TCRA,TCRB", value_delimiter = ',')]
    pub lengths: Option<Vec<usize>>,
}

/// Arguments for the `segment-batch` subcommand.
#[derive(Args, Debug)]
pub struct SegmentBatchArgs {
    /// Directory of relaxed models (`<prefix>_run_*.pdb`).
    #[arg(short, long, required = true, value_name = "DIR")]
    pub input_dir: PathBuf,

    /// Directory holding one `<prefix>.tsv` targets file per model.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub targets_dir: PathBuf,

    /// Destination directory; outputs keep their input file names.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub output_dir: PathBuf,
}

/// Arguments for the `remap` subcommand.
#[derive(Args, Debug)]
pub struct RemapArgs {
    /// A PDB file, or a directory whose `*.pdb` files are all processed.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Destination directory; outputs keep their input file names.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Configuration file in TOML format with a `[remap]` section.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override one substitution, e.g. `-m C=A`. Can be used multiple times.
    #[arg(short, long = "map", value_name = "FROM=TO", value_parser = parser::parse_chain_mapping)]
    pub map: Vec<(char, char)>,

    /// Replace the required chain set, e.g. `--require A,B,C,D,E`.
    #[arg(
        short,
        long,
        value_name = "IDS",
        value_delimiter = ',',
        value_parser = parser::parse_chain_id
    )]
    pub require: Option<Vec<char>>,
}
