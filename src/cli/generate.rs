use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::hooks::{CodegenConfig, OperationDescriptor, generate};
use hookgen_common::{load_config, load_operations};

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Codegen configuration (.yml, .yaml, .json or .toml)
    #[arg(long, value_name = "CONFIG_PATH")]
    pub config: PathBuf,
    /// Operations list produced by the document traversal stage
    #[arg(long, value_name = "OPERATIONS_PATH")]
    pub operations: PathBuf,
    /// Output file; stdout when omitted
    #[arg(long, value_name = "OUT_PATH")]
    pub out: Option<PathBuf>,
}

pub fn run(args: GenerateArgs) -> i32 {
    match run_inner(&args) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn run_inner(args: &GenerateArgs) -> Result<()> {
    let config = CodegenConfig::from_raw(load_config(&args.config)?)?;
    let input = load_operations(&args.operations)?;
    debug!(
        config = %args.config.display(),
        operations = input.operations.len(),
        "loaded inputs"
    );

    let operations: Vec<OperationDescriptor> = input
        .operations
        .into_iter()
        .map(OperationDescriptor::from)
        .collect();
    let rendered = generate(&operations, &input.documents, &config)?.render();

    match &args.out {
        Some(path) => {
            write_output(path, &rendered)?;
            info!(path = %path.display(), "wrote hooks file");
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::Write {
            path: parent.display().to_string(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| Error::Write {
        path: path.display().to_string(),
        source,
    })
}
