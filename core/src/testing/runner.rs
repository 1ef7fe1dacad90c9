use std::time::Duration;

use super::{program::*, result::{self, *}, testcase::*};

#[derive(Debug, Clone)]
pub struct TestRunner {
    program: Program,
    execution_time_limit: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generation {
    Created,
    GeneratorFailed,
    SolverFailed,
}

impl TestRunner {
    const DEFAULT_EXEC_TIME_LIMIT: Duration = Duration::from_secs(10);

    pub fn new(program: Program) -> Self {
        Self {
            program,
            execution_time_limit: Self::DEFAULT_EXEC_TIME_LIMIT,
        }
    }

    pub fn execution_time_limit(mut self, limit: Duration) -> Self {
        self.execution_time_limit = limit;
        self
    }

    pub fn get_program(&self) -> &Program {
        &self.program
    }

    pub fn get_exec_time_limit(&self) -> Duration {
        self.execution_time_limit
    }

    pub async fn run(&self, data: &TestData) -> Result<TestOutcome> {
        let exec = self
            .program
            .execute(Some(data.input.as_bytes()), self.execution_time_limit)
            .await?;

        let judge = match &exec.output {
            None => JudgeCode::TLE,
            Some(out) => result::judge(
                out.status == Some(0),
                &out.stdout,
                &out.stderr,
                &data.groundtruth,
            ),
        };

        Ok(TestOutcome {
            judge,
            execution_time: exec.elapsed,
            memory_usage: None,
            groundtruth: data.groundtruth.clone(),
            output: exec.output,
        })
    }

    /// Runs `generator` to make an input, then this runner's program on it to make the answer.
    /// Files are written only when both succeed.
    pub async fn generate(
        &self,
        generator: &Program,
        testcase: &FsTestcase,
    ) -> anyhow::Result<Generation> {
        let limit = self.execution_time_limit;

        let input = match generator.execute(None, limit).await?.output {
            Some(out) if out.status == Some(0) => out.stdout,
            Some(out) => {
                log::warn!(
                    "Generator exited with {:?} (testcase {})",
                    out.status,
                    testcase.index()
                );
                return Ok(Generation::GeneratorFailed);
            }
            None => {
                log::warn!("Generator timed out (testcase {})", testcase.index());
                return Ok(Generation::GeneratorFailed);
            }
        };

        let answer = match self.program.execute(Some(input.as_bytes()), limit).await?.output {
            Some(out) if out.status == Some(0) => out.stdout,
            Some(out) => {
                log::warn!(
                    "Program exited with {:?} on generated input (testcase {})",
                    out.status,
                    testcase.index()
                );
                return Ok(Generation::SolverFailed);
            }
            None => {
                log::warn!(
                    "Program timed out on generated input (testcase {})",
                    testcase.index()
                );
                return Ok(Generation::SolverFailed);
            }
        };

        testcase.save(&input, &answer)?;
        Ok(Generation::Created)
    }
}
