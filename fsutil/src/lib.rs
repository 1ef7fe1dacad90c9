use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

pub mod error {
    use std::{io, path::PathBuf};

    pub type Result<T> = std::result::Result<T, self::Error>;

    type Msg = &'static str;

    #[derive(Debug, thiserror::Error)]
    pub enum Error {
        #[error("{0} ({1}): {2}")]
        SingleIO(Msg, PathBuf, #[source] io::Error),
    }
}
pub use error::{Error, Result};

#[must_use]
pub fn write<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    fs::write(&filepath, contents)
        .map_err(|e| Error::SingleIO("Cannot write file", filepath.as_ref().to_owned(), e))
}

#[must_use]
pub fn read_to_string(filepath: impl AsRef<Path>) -> Result<String> {
    fs::read_to_string(&filepath)
        .map_err(|e| Error::SingleIO("Cannot read file", filepath.as_ref().to_owned(), e))
}

/// Like [`read_to_string`], but an unreadable file (missing, a directory, not UTF-8, ...)
/// yields `None` instead of an error.
pub fn read_to_string_opt(filepath: impl AsRef<Path>) -> Option<String> {
    match self::read_to_string(&filepath) {
        Ok(s) => Some(s),
        Err(e) => {
            log::debug!("{}", e);
            None
        }
    }
}

/// Creates the file, truncating it if it already exists.
#[must_use]
pub fn create_file(filepath: impl AsRef<Path>) -> Result<File> {
    File::create(&filepath)
        .map_err(|e| Error::SingleIO("Cannot create file", filepath.as_ref().to_owned(), e))
}

/// Join `filename` under `dir`, or return it as-is when no dir is given.
/// ```
/// use fsutil::join_opt;
/// use std::path::Path;
///
/// assert_eq!(join_opt(Some(Path::new("tests")), "i1"), Path::new("tests/i1"));
/// assert_eq!(join_opt(None, "o3"), Path::new("o3"));
/// ```
pub fn join_opt(dir: Option<&Path>, filename: impl AsRef<Path>) -> PathBuf {
    match dir {
        Some(dir) => dir.join(filename),
        None => filename.as_ref().to_owned(),
    }
}

/// Find the first existing file named `filename` in `start_dir` or its ancestors.
pub fn find_file_in_ancestors(start_dir: impl AsRef<Path>, filename: &str) -> Option<PathBuf> {
    start_dir
        .as_ref()
        .ancestors()
        .map(|dir| dir.join(filename))
        .find(|path| path.is_file())
}
