use contest_cli::cmd::{self, GlobalArgs};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // syntax errors (unknown flag, bad integer, ...) keep clap's report and exit code
    let app = GlobalArgs::try_parse_args_from(std::env::args_os()).unwrap_or_else(|e| e.exit());

    let res = match app {
        Ok(app) => app.exec_subcmd().await,
        Err(e) => Err(e),
    };
    res.unwrap_or_else(|e| eprintln!("{}", cmd::failure_message(&e)));
}
