use std::path::PathBuf;

use anyhow::Context as _;

pub fn current_dir() -> anyhow::Result<PathBuf> {
    std::env::current_dir().context("Failed to get current dir")
}

#[derive(Debug, thiserror::Error)]
#[error("{0} doesn't exist")]
pub struct NoSuchPath(pub String);

/// clap value parser rejecting paths that do not exist.
pub fn existing_path(s: &str) -> Result<PathBuf, NoSuchPath> {
    let path = PathBuf::from(s);
    if path.exists() {
        Ok(path)
    } else {
        Err(NoSuchPath(s.to_owned()))
    }
}
