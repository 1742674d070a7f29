fn main() -> anyhow::Result<()> {
    wavbake::cli::run_cli()
}
