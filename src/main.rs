fn main() {
    #[cfg(feature = "cli")]
    spcfile::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("spcfile: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
