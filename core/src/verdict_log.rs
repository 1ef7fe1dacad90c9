use std::{
    io::{self, Write},
    path::Path,
    time::Duration,
};

use chrono::Local;

use crate::testing::{JudgeCode, TestOutcome};

/// Destination of the details of failed testcases (stderr, expected vs. actual).
pub struct VerdictLog {
    out: Box<dyn Write + Send>,
}

impl VerdictLog {
    /// Truncates the file if it already exists.
    pub fn create(filepath: impl AsRef<Path>) -> fsutil::Result<Self> {
        let f = fsutil::create_file(filepath)?;
        Ok(Self::new(io::BufWriter::new(f)))
    }

    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self { out: Box::new(out) }
    }

    /// Records `outcome` unless it is OK. `time_limit` is the limit the test ran under.
    pub fn record(
        &mut self,
        index: usize,
        outcome: &TestOutcome,
        time_limit: Duration,
    ) -> io::Result<()> {
        let now = Local::now().format("%Y-%m-%d %H:%M:%S");
        let actual = outcome.output.as_ref();
        match outcome.judge {
            JudgeCode::OK => return Ok(()),
            JudgeCode::RE => {
                writeln!(
                    self.out,
                    "{} ERROR Test {}: Runtime error (exit status: {})",
                    now,
                    index,
                    actual
                        .and_then(|o| o.status)
                        .map_or("killed by signal".to_owned(), |c| c.to_string()),
                )?;
                writeln!(
                    self.out,
                    "\tStderr:\n\t{}",
                    actual.map_or("", |o| o.stderr.trim())
                )?;
            }
            JudgeCode::WA => {
                writeln!(self.out, "{} ERROR Test {}: Wrong answer", now, index)?;
                writeln!(
                    self.out,
                    "\tExpected:\n\t{}\n\tGot:\n\t{}",
                    outcome.groundtruth.trim(),
                    actual.map_or("", |o| o.stdout.trim()),
                )?;
            }
            JudgeCode::TLE => {
                writeln!(
                    self.out,
                    "{} ERROR Test {}: Time limit exceeded (limit: {}ms, killed after {}ms)",
                    now,
                    index,
                    time_limit.as_millis(),
                    outcome.execution_time.as_millis(),
                )?;
            }
        }
        self.out.flush()
    }
}
