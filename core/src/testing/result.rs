use std::{path::PathBuf, time::Duration};

use super::testcase::FsTestcase;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Clone)]
pub struct TestOutcome {
    pub judge: JudgeCode,
    pub execution_time: Duration,
    /// Peak memory in bytes. `None` means it was not measured.
    pub memory_usage: Option<u64>,
    pub groundtruth: String,
    /// `None` when the process was killed by the time limit.
    pub output: Option<ProcessOutput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum JudgeCode {
    OK,
    WA,
    TLE,
    RE,
}

/// Result of one numbered testcase in a batch.
#[derive(Debug, Clone)]
pub struct CaseResult {
    pub testcase: FsTestcase,
    pub status: CaseStatus,
}

#[derive(Debug, Clone)]
pub enum CaseStatus {
    Judged(TestOutcome),
    CannotOpen(PathBuf),
}

impl CaseResult {
    pub fn judge(&self) -> Option<JudgeCode> {
        match &self.status {
            CaseStatus::Judged(outcome) => Some(outcome.judge),
            CaseStatus::CannotOpen(_) => None,
        }
    }
}

/// RE when the program exited abnormally or wrote to stderr,
/// otherwise OK iff the stdout matches the groundtruth ignoring surrounding whitespace.
pub fn judge(exit_success: bool, stdout: &str, stderr: &str, groundtruth: &str) -> JudgeCode {
    if !exit_success || !stderr.trim().is_empty() {
        JudgeCode::RE
    } else if stdout.trim() == groundtruth.trim() {
        JudgeCode::OK
    } else {
        JudgeCode::WA
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_be_ok_ignoring_surrounding_whitespace() {
        assert_eq!(judge(true, "5\n", "", "5"), JudgeCode::OK);
        assert_eq!(judge(true, "  1 2\n3\n\n", "", "1 2\n3"), JudgeCode::OK);
        assert_eq!(judge(true, "", "", "\n"), JudgeCode::OK);
    }

    #[test]
    fn should_be_wa_on_inner_difference() {
        assert_eq!(judge(true, "4\n", "", "5\n"), JudgeCode::WA);
        assert_eq!(judge(true, "1  2", "", "1 2"), JudgeCode::WA);
    }

    #[test]
    fn should_be_re_on_nonzero_exit_even_if_stdout_is_correct() {
        assert_eq!(judge(false, "5\n", "", "5\n"), JudgeCode::RE);
    }

    #[test]
    fn should_be_re_on_stderr_even_if_exit_is_zero() {
        assert_eq!(judge(true, "5\n", "debug: x=5\n", "5\n"), JudgeCode::RE);
    }

    #[test]
    fn whitespace_only_stderr_should_not_be_re() {
        assert_eq!(judge(true, "5\n", " \n", "5\n"), JudgeCode::OK);
    }

    #[test]
    fn judge_code_should_display_as_abbreviation() {
        assert_eq!(JudgeCode::OK.to_string(), "OK");
        assert_eq!(JudgeCode::RE.to_string(), "RE");
        assert_eq!(JudgeCode::WA.to_string(), "WA");
        assert_eq!(JudgeCode::TLE.to_string(), "TLE");
    }
}
