//! `stepkit` binary.

fn main() -> eyre::Result<()> {
    stepkit_cli::cli::run()
}
