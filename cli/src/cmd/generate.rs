use std::path::PathBuf;

use contest_core::{
    action,
    testing::{Program, TestRunner},
};

use crate::util;

use super::{GlobalArgs, SubcmdResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Path to program (its output becomes the expected answer)
    #[arg(value_parser = util::existing_path)]
    pub program: PathBuf,

    /// Path to generator (its output becomes the input)
    #[arg(value_parser = util::existing_path)]
    pub generator: PathBuf,

    /// Tests directory
    #[arg(short = 'd', long = "dir", value_parser = util::existing_path)]
    pub testcase_dir: Option<PathBuf>,

    /// Number of tests
    #[arg(short = 'n', default_value_t = 1)]
    pub n: usize,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = global_args.load_config()?;
    let program = Program::classify(&args.program, &cfg.test)?;
    let generator = Program::classify(&args.generator, &cfg.test)?;
    let runner = TestRunner::new(program).execution_time_limit(cfg.test.time_limit());

    action::do_generate(&runner, &generator, args.testcase_dir.as_deref(), args.n).await?;
    Ok(())
}
