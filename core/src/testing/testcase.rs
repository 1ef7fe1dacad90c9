use std::path::{Path, PathBuf};

/// A pair of `i<N>` / `o<N>` files under an optional directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsTestcase {
    index: usize,
    input_data_path: PathBuf,
    groundtruth_data_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestData {
    pub input: String,
    pub groundtruth: String,
}

impl FsTestcase {
    pub const INPUT_PREFIX: &str = "i";
    pub const GROUNDTRUTH_PREFIX: &str = "o";

    pub fn numbered(dir: Option<&Path>, index: usize) -> Self {
        Self {
            index,
            input_data_path: fsutil::join_opt(dir, format!("{}{}", Self::INPUT_PREFIX, index)),
            groundtruth_data_path: fsutil::join_opt(
                dir,
                format!("{}{}", Self::GROUNDTRUTH_PREFIX, index),
            ),
        }
    }

    /// Testcases `1..=n`.
    pub fn enumerate(dir: Option<&Path>, n: usize) -> Vec<Self> {
        (1..=n).map(|i| Self::numbered(dir, i)).collect()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn input_path(&self) -> &Path {
        &self.input_data_path
    }

    pub fn groundtruth_path(&self) -> &Path {
        &self.groundtruth_data_path
    }

    /// Reads both files. On failure returns the path that could not be read.
    pub fn load(&self) -> Result<TestData, PathBuf> {
        let input = fsutil::read_to_string_opt(&self.input_data_path)
            .ok_or_else(|| self.input_data_path.clone())?;
        let groundtruth = fsutil::read_to_string_opt(&self.groundtruth_data_path)
            .ok_or_else(|| self.groundtruth_data_path.clone())?;
        Ok(TestData { input, groundtruth })
    }

    #[must_use]
    pub fn save(&self, input: impl AsRef<[u8]>, groundtruth: impl AsRef<[u8]>) -> fsutil::Result<()> {
        fsutil::write(&self.input_data_path, input)?;
        fsutil::write(&self.groundtruth_data_path, groundtruth)
    }
}
