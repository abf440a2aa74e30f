use clap::Parser;
use most_improved::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    let Some(command) = args.command else {
        show_help_and_commands();
        process::exit(0);
    };

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Dropping the command future stops new documents from being scheduled
        tokio::select! {
            result = commands::run(command) => result,
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    eprintln!("Failed to listen for CTRL+C: {}", e);
                }
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(most_improved::Error::processing_interrupted(
                    "Processing interrupted by user",
                ))
            }
        }
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Most Improved - Swim Meet Improvement Reporter");
    println!("==============================================");
    println!();
    println!("Extract improved swim times from meet-results documents (PDF or text)");
    println!("and rank the swimmers who dropped the most time.");
    println!();
    println!("USAGE:");
    println!("    most-improved <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Process every document in a directory and write tables (main command)");
    println!("    parse       Parse a single document and print its tables to stdout");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Process ./.data into ./.output as CSV:");
    println!("    most-improved process");
    println!();
    println!("    # Regex dialect, Parquet output, custom directories:");
    println!("    most-improved process --input meets/ --output tables/ \\");
    println!("                          --strategy pattern --format parquet");
    println!();
    println!("    # Inspect one document:");
    println!("    most-improved parse meets/june_invitational.pdf");
    println!();
    println!("For detailed help on any command, use:");
    println!("    most-improved <COMMAND> --help");
}
