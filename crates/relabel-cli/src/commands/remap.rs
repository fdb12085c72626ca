use crate::cli::RemapArgs;
use crate::config::PartialConfig;
use crate::error::Result;
use crate::utils::files;
use relabel::engine::progress::ProgressReporter;
use relabel::workflows::batch::{self, RemapJob};
use tracing::{debug, info, warn};

pub async fn run(args: RemapArgs, quiet: bool) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialConfig::from_file(path)?,
        None => PartialConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;
    debug!(
        "Remap table {:?}, required chains {:?}",
        config.chain_map, config.required
    );

    let inputs = files::collect_pdb_files(&args.input)?;
    if inputs.is_empty() {
        warn!("No PDB files found in {:?}", &args.input);
        println!("No PDB files found in {}.", args.input.display());
        return Ok(());
    }

    let jobs: Vec<RemapJob> = inputs
        .into_iter()
        .map(|input| RemapJob {
            output: files::output_path_for(&input, &args.output_dir),
            input,
        })
        .collect();

    let progress_handler = super::progress_handler(quiet);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let summary = tokio::task::block_in_place(|| batch::run_remap_batch(jobs, &config, &reporter));
    super::finish(&summary)
}
