use clap::Parser;
use miette::Result;
use maintwatch::cli::{commands, Cli, Commands};
use maintwatch::core::logging;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior so piping into `head` exits quietly
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    logging::init(global.verbose, global.quiet);

    match cli.command {
        Commands::Mtbf(cmd) => commands::mtbf::run(cmd, &global),
        Commands::Forecast(args) => commands::forecast::run(args, &global),
        Commands::Validate(args) => commands::validate::run(args, &global),
        Commands::Normalize(args) => commands::normalize::run(args, &global),
        Commands::Summary(args) => commands::summary::run(args, &global),
        Commands::Report(args) => commands::report::run(args, &global),
        Commands::Template(args) => commands::template::run(args),
        Commands::Completions(args) => commands::completions::run(args),
    }
}
