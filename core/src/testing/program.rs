use std::{
    ffi::OsStr,
    io,
    path::{Path, PathBuf},
    process::Stdio,
    string::FromUtf8Error,
    time::Duration,
};

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    process::Command,
    time::Instant,
};

use super::result::ProcessOutput;
use crate::config::TestConfig;

pub type Result<T> = std::result::Result<T, ProgramError>;

#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    #[error("Unrecognized program type: {0:?} (no interpreter configured for '.{1}')")]
    UnrecognizedExtension(PathBuf, String),

    #[error("Empty interpreter command configured for '.{0}'")]
    EmptyInterpreter(String),

    #[error("Failed to spawn '{0}'")]
    Spawn(String, #[source] io::Error),

    #[error("Failed to communicate with subprocess '{0}'")]
    Communicate(String, #[source] io::Error),

    #[error("Output of '{0}' is not valid UTF-8")]
    NonUtf8Output(String, #[source] FromUtf8Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramKind {
    /// Executed directly.
    Binary,
    /// Executed as `{interpreter...} {path}`.
    Script { interpreter: Vec<String> },
    // TODO: `Compiled { compile: .. }` for sources that need a build step before running.
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    path: PathBuf,
    kind: ProgramKind,
}

#[derive(Debug, Clone)]
pub struct Execution {
    pub elapsed: Duration,
    /// `None` when the process was killed by the time limit.
    pub output: Option<ProcessOutput>,
}

impl Program {
    /// No extension => binary, configured extension => script, otherwise an error.
    pub fn classify(path: impl Into<PathBuf>, cfg: &TestConfig) -> Result<Self> {
        let path = path.into();
        let ext = path.extension().map(|ext| ext.to_string_lossy().into_owned());
        let kind = match ext {
            None => ProgramKind::Binary,
            Some(ext) => match cfg.find_interpreter_for_extension(&ext) {
                Some([]) => return Err(ProgramError::EmptyInterpreter(ext)),
                Some(cmd) => ProgramKind::Script {
                    interpreter: cmd.to_vec(),
                },
                None => return Err(ProgramError::UnrecognizedExtension(path, ext)),
            },
        };
        Ok(Self { path, kind })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> &ProgramKind {
        &self.kind
    }

    /// A bare file name like `main` must not be looked up in `$PATH`.
    fn invocation_path(&self) -> PathBuf {
        match self.path.parent() {
            Some(dir) if dir.as_os_str().is_empty() => Path::new(".").join(&self.path),
            _ => self.path.clone(),
        }
    }

    fn argv(&self) -> Vec<&OsStr> {
        match &self.kind {
            ProgramKind::Binary => vec![self.path.as_os_str()],
            ProgramKind::Script { interpreter } => interpreter
                .iter()
                .map(OsStr::new)
                .chain([self.path.as_os_str()])
                .collect(),
        }
    }

    fn command(&self) -> Command {
        match &self.kind {
            ProgramKind::Binary => Command::new(self.invocation_path()),
            ProgramKind::Script { interpreter } => {
                let mut cmd = Command::new(&interpreter[0]);
                cmd.args(&interpreter[1..]).arg(&self.path);
                cmd
            }
        }
    }

    pub fn command_line(&self) -> String {
        self.argv()
            .iter()
            .map(|s| s.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Runs the program to completion or until `time_limit` elapses.
    /// `stdin_data = None` gives the child no stdin at all.
    pub async fn execute(
        &self,
        stdin_data: Option<&[u8]>,
        time_limit: Duration,
    ) -> Result<Execution> {
        let cmdline = self.command_line();
        log::debug!("Spawning: {}", cmdline);

        let mut proc = self
            .command()
            .stdin(match stdin_data {
                Some(_) => Stdio::piped(),
                None => Stdio::null(),
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ProgramError::Spawn(cmdline.clone(), e))?;
        let start_at = Instant::now();

        let stdin = proc.stdin.take();
        let (Some(mut stdout), Some(mut stderr)) = (proc.stdout.take(), proc.stderr.take()) else {
            let e = io::Error::new(io::ErrorKind::Other, "stdout/stderr is not piped");
            return Err(ProgramError::Communicate(cmdline, e));
        };

        let feed_stdin = async move {
            let (Some(mut stdin), Some(data)) = (stdin, stdin_data) else {
                return Ok(());
            };
            match stdin.write_all(data).await {
                // The program exited (or closed stdin) without reading all of it.
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                res => res,
            }
            // `stdin` is dropped here so that the program sees EOF
        };

        let mut stdout_buf = Vec::new();
        let mut stderr_buf = Vec::new();

        let res = tokio::time::timeout(time_limit, async {
            tokio::try_join!(
                feed_stdin,
                stdout.read_to_end(&mut stdout_buf),
                stderr.read_to_end(&mut stderr_buf),
                proc.wait(),
            )
        })
        .await;

        let elapsed = start_at.elapsed();

        match res {
            Err(_) => {
                proc.kill()
                    .await
                    .unwrap_or_else(|e| log::warn!("Failed to kill TLE process: {:#}", e));
                Ok(Execution {
                    elapsed,
                    output: None,
                })
            }

            Ok(Err(e)) => Err(ProgramError::Communicate(cmdline, e)),

            Ok(Ok((_, _, _, exit_status))) => {
                let stdout = String::from_utf8(stdout_buf)
                    .map_err(|e| ProgramError::NonUtf8Output(cmdline.clone(), e))?;
                let stderr = String::from_utf8(stderr_buf)
                    .map_err(|e| ProgramError::NonUtf8Output(cmdline, e))?;
                Ok(Execution {
                    elapsed,
                    output: Some(ProcessOutput {
                        status: exit_status.code(),
                        stdout,
                        stderr,
                    }),
                })
            }
        }
    }
}
