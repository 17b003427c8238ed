use clap::{ArgAction, Parser, Subcommand};
use modlingo::Lexicon;
use modlingo_cli::{
    TranslateOptions, run_text_command, run_translate_command, stats::print_stats,
    validation::validate_output_path, write_lexicon_file,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG is used when not given.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Auto-translate SST XML exports and write the FormID and strings-only files.
    Translate {
        /// Input files or glob patterns
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<String>,

        /// Lexicon table (.json, .toml, .yaml) replacing the built-in one
        #[arg(long)]
        lexicon: Option<String>,

        /// Merge the lexicon file over the built-in table instead of replacing it
        #[arg(long, requires = "lexicon")]
        extend: bool,

        /// Directory for the output files (defaults to next to each input)
        #[arg(long)]
        out_dir: Option<String>,

        /// Translate and report counts without writing files
        #[arg(long)]
        dry_run: bool,

        /// Write per-file reports as JSON to this path
        #[arg(long)]
        report_json: Option<String>,
    },

    /// Translate a single string and print the result.
    Text {
        /// The text to translate
        text: String,

        /// Lexicon table (.json, .toml, .yaml) replacing the built-in one
        #[arg(long)]
        lexicon: Option<String>,

        /// Merge the lexicon file over the built-in table instead of replacing it
        #[arg(long, requires = "lexicon")]
        extend: bool,
    },

    /// Show translation coverage of an SST XML export.
    Stats {
        /// The input file to inspect
        #[arg(short, long)]
        input: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Export the built-in lexicon as an editable table.
    Lexicon {
        /// Output file; the format follows the extension (.json, .toml, .yaml)
        #[arg(short, long)]
        output: String,
    },
}

fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let result = match args.commands {
        Commands::Translate {
            input,
            lexicon,
            extend,
            out_dir,
            dry_run,
            report_json,
        } => run_translate_command(TranslateOptions {
            inputs: input,
            lexicon,
            extend,
            out_dir,
            dry_run,
            report_json,
        }),
        Commands::Text {
            text,
            lexicon,
            extend,
        } => run_text_command(&text, lexicon.as_deref(), extend).map(|out| println!("{}", out)),
        Commands::Stats { input, json } => print_stats(&input, json),
        Commands::Lexicon { output } => {
            let lexicon = Lexicon::builtin();
            validate_output_path(&output)
                .and_then(|_| write_lexicon_file(&lexicon, &output))
                .map(|_| {
                    println!(
                        "Wrote built-in lexicon ({} words, {} opener rules) to {}",
                        lexicon.words().len(),
                        lexicon.openers().len(),
                        output
                    )
                })
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
