mod cli;
mod platform;

fn main() -> anyhow::Result<std::process::ExitCode> {
    platform::run_app()
}
