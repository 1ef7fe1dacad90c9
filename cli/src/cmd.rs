pub mod generate;

use std::{error::Error as _, ffi::OsString, path::PathBuf};

use clap::Parser as _;
use contest_core::Config;

use crate::util;

#[derive(Debug, clap::Parser)]
#[command(name = "contest", author, version, about, long_about = None)]
pub struct GlobalArgs {
    #[command(subcommand)]
    pub subcmd: Option<Subcommand>,

    /// Config file [default: contest.toml in the current dir or its ancestors]
    #[arg(long, global = true, value_parser = util::existing_path)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    /// Test your program
    #[command(alias("t"))]
    Test(test::Args),

    /// Generate tests
    #[command(alias("g"))]
    Generate(generate::Args),
}

pub type SubcmdResult = anyhow::Result<()>;

impl GlobalArgs {
    /// Like `try_parse_from`, but a nonexistent path argument is not a usage error:
    /// it comes back as `Ok(Err(..))` to be reported like any failure of the subcommand.
    pub fn try_parse_args_from<I, T>(itr: I) -> Result<anyhow::Result<Self>, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(itr) {
            Ok(args) => Ok(Ok(args)),
            Err(e) => match e.source().and_then(|src| src.downcast_ref::<util::NoSuchPath>()) {
                Some(no_such_path) => Ok(Err(anyhow::anyhow!("{}", no_such_path))),
                None => Err(e),
            },
        }
    }

    pub async fn exec_subcmd(&self) -> SubcmdResult {
        use Subcommand::*;
        match &self.subcmd {
            None => Ok(()),
            Some(Test(args)) => test::exec(args, self).await,
            Some(Generate(args)) => generate::exec(args, self).await,
        }
    }

    pub fn load_config(&self) -> anyhow::Result<Config> {
        match &self.config {
            Some(path) => Config::from_toml_file(path.clone()),
            None => Config::from_file_finding_in_ancestors_or_default(util::current_dir()?),
        }
    }
}

/// The single line printed for a failure. The exit code stays 0.
pub fn failure_message(e: &anyhow::Error) -> String {
    format!("contest failed: {:#}", e)
}
