pub mod error {
    #[allow(unused_imports)]
    pub(crate) use anyhow::{anyhow, bail, ensure, Context as _};
    pub use anyhow::{Error, Result};
}
use std::path::Path;
use std::time::Duration;

use error::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::style;
use crate::testing::{CaseResult, CaseStatus, FsTestcase, Generation, Program, TestRunner};
use crate::verdict_log::VerdictLog;

fn spinner(msg: String) -> ProgressBar {
    let style = ProgressStyle::with_template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    let bar = ProgressBar::new_spinner().with_style(style).with_message(msg);
    bar.enable_steady_tick(Duration::from_millis(50));
    bar
}

/// Runs testcases `1..=n` in order. Failed verdicts are recorded to `verdict_log`.
pub async fn do_test(
    runner: &TestRunner,
    testcase_dir: Option<&Path>,
    n: usize,
    verdict_log: &mut VerdictLog,
) -> Result<Vec<CaseResult>> {
    let program = runner.get_program();
    style::print_test_header(program.path(), testcase_dir, n);
    log::info!("Running: {}", program.command_line());

    let mut results = Vec::with_capacity(n);

    for t in FsTestcase::enumerate(testcase_dir, n) {
        let status = match t.load() {
            Err(path) => {
                log::warn!("Cannot open {:?}", path);
                CaseStatus::CannotOpen(path)
            }
            Ok(data) => {
                let bar = spinner(format!("Testcase {} ...", t.index()));
                let res = runner.run(&data).await;
                bar.finish_and_clear();

                let outcome =
                    res.with_context(|| format!("Failed to run testcase {}", t.index()))?;
                verdict_log
                    .record(t.index(), &outcome, runner.get_exec_time_limit())
                    .context("Failed to write verdict log")?;
                CaseStatus::Judged(outcome)
            }
        };
        results.push(CaseResult { testcase: t, status });
    }

    style::print_result_table(&results);
    if !results.is_empty() {
        println!();
        style::print_test_result_summary(&results);
    }
    Ok(results)
}

/// Tries to create testcases `1..=n`; a failure on one index does not stop the others.
/// Returns the number of created testcases.
pub async fn do_generate(
    runner: &TestRunner,
    generator: &Program,
    testcase_dir: Option<&Path>,
    n: usize,
) -> Result<usize> {
    style::print_generate_header(runner.get_program().path(), generator.path(), testcase_dir, n);
    log::info!(
        "Generating with: {} | {}",
        generator.command_line(),
        runner.get_program().command_line()
    );

    let mut created_tests = 0;

    for t in FsTestcase::enumerate(testcase_dir, n) {
        let bar = spinner(format!("Generating testcase {} ...", t.index()));
        let res = runner.generate(generator, &t).await;
        bar.finish_and_clear();

        match res {
            Ok(Generation::Created) => created_tests += 1,
            Ok(Generation::GeneratorFailed | Generation::SolverFailed) => (),
            Err(e) => log::error!("Failed to generate testcase {}: {:#}", t.index(), e),
        }
    }

    style::print_generate_summary(created_tests);
    Ok(created_tests)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::{InterpreterConfig, TestConfig};
    use crate::testing::JudgeCode;
    use std::io;

    fn sh_config() -> TestConfig {
        let mut cfg = TestConfig::default();
        cfg.interpreter.push(InterpreterConfig {
            extension: "sh".to_owned(),
            command: vec!["sh".to_owned()],
        });
        cfg
    }

    fn sh_runner(dir: &Path, name: &str, body: &str) -> TestRunner {
        let path = dir.join(name);
        fsutil::write(&path, body).unwrap();
        let program = Program::classify(path, &sh_config()).unwrap();
        TestRunner::new(program).execution_time_limit(Duration::from_secs(5))
    }

    fn judges(results: &[CaseResult]) -> Vec<Option<JudgeCode>> {
        results.iter().map(CaseResult::judge).collect()
    }

    #[tokio::test]
    async fn missing_files_should_not_stop_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let runner = sh_runner(dir.path(), "main.sh", "cat\n");
        FsTestcase::numbered(Some(dir.path()), 1).save("1\n", "1\n").unwrap();
        fsutil::write(dir.path().join("i2"), "2\n").unwrap();
        FsTestcase::numbered(Some(dir.path()), 3).save("3\n", "4\n").unwrap();

        let mut log = VerdictLog::new(io::sink());
        let results = do_test(&runner, Some(dir.path()), 3, &mut log).await.unwrap();

        assert_eq!(
            judges(&results),
            vec![Some(JudgeCode::OK), None, Some(JudgeCode::WA)]
        );
        match &results[1].status {
            CaseStatus::CannotOpen(path) => assert_eq!(path, &dir.path().join("o2")),
            s => panic!("unexpected status {:?}", s),
        }
    }

    #[tokio::test]
    async fn zero_tests_should_be_empty_batch() {
        let dir = tempfile::tempdir().unwrap();
        let runner = sh_runner(dir.path(), "main.sh", "cat\n");
        let mut log = VerdictLog::new(io::sink());
        let results = do_test(&runner, Some(dir.path()), 0, &mut log).await.unwrap();
        assert!(results.is_empty());

        let gen = Program::classify(dir.path().join("main.sh"), &sh_config()).unwrap();
        let created = do_generate(&runner, &gen, Some(dir.path()), 0).await.unwrap();
        assert_eq!(created, 0);
    }

    #[tokio::test]
    async fn repeated_runs_should_give_same_verdicts() {
        let dir = tempfile::tempdir().unwrap();
        let runner = sh_runner(dir.path(), "main.sh", "read x; echo $((x * 2))\n");
        for (i, (input, output)) in [("1", "2"), ("2", "5"), ("3", "6")].iter().enumerate() {
            FsTestcase::numbered(Some(dir.path()), i + 1)
                .save(input, output)
                .unwrap();
        }

        let mut log = VerdictLog::new(io::sink());
        let first = do_test(&runner, Some(dir.path()), 3, &mut log).await.unwrap();
        let second = do_test(&runner, Some(dir.path()), 3, &mut log).await.unwrap();
        assert_eq!(judges(&first), judges(&second));
        assert_eq!(
            judges(&first),
            vec![Some(JudgeCode::OK), Some(JudgeCode::WA), Some(JudgeCode::OK)]
        );
    }

    #[tokio::test]
    async fn generate_should_continue_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let runner = sh_runner(dir.path(), "sum.sh", "read a; read b; echo $((a + b))\n");

        // Fails on every second run.
        let counter = dir.path().join("count");
        let gen_path = dir.path().join("gen.sh");
        fsutil::write(
            &gen_path,
            format!(
                "c=$(cat '{0}' 2>/dev/null || echo 0)\n\
                 echo $((c + 1)) > '{0}'\n\
                 [ $((c % 2)) -eq 0 ] || exit 1\n\
                 printf '3\\n4\\n'\n",
                counter.display()
            ),
        )
        .unwrap();
        let gen = Program::classify(&gen_path, &sh_config()).unwrap();

        let created = do_generate(&runner, &gen, Some(dir.path()), 3).await.unwrap();
        assert_eq!(created, 2);

        for i in [1, 3] {
            let data = FsTestcase::numbered(Some(dir.path()), i).load().unwrap();
            assert_eq!(data.input, "3\n4\n");
            assert_eq!(data.groundtruth, "7\n");
        }
        assert!(!dir.path().join("i2").exists());
        assert!(!dir.path().join("o2").exists());
    }
}
