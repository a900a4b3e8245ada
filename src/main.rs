use clap::Parser;
use swift_url_check::cli::Cli;
use swift_url_check::utils::logger::init_logger;

fn main() {
    let cli = Cli::parse();

    // Initialize logging before anything can fail.
    if let Err(err) = init_logger(cli.log_dir.as_deref()) {
        eprintln!("swift-url-check: logging disabled: {:#}", err);
    }

    match cli.run() {
        Ok(summary) => {
            eprintln!("{} of {} inputs are valid URLs", summary.valid, summary.checked);
            std::process::exit(if summary.all_valid() { 0 } else { 1 });
        }
        Err(err) => {
            eprintln!("swift-url-check error: {:#}", err);
            std::process::exit(2);
        }
    }
}
