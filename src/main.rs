use clap::{Parser, Subcommand};
use scytale::cli::{
    analysis_report, encode_text, mask_file, show_analysis, EncodeOptions, MaskOptions,
};
use scytale::error::Result;
use scytale::pipeline::{parse_mask, PipelineDescriptor, StageDescriptor};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

/// Version info from build.rs
const VERSION: &str = env!("SCYTALE_VERSION");
const BUILD: &str = env!("SCYTALE_BUILD");
const PROFILE: &str = env!("SCYTALE_PROFILE");
const GIT_HASH: &str = env!("SCYTALE_GIT_HASH");

/// Combined version string (compile-time concatenation not possible, so we build at runtime)
fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING
        .get_or_init(|| format!("{} {} build {} ({})", PROFILE, VERSION, BUILD, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "scytale")]
#[command(author, about = "Composable classical-cipher pipelines", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a text pipeline over a string or stdin
    #[command(alias = "e")]
    Encode {
        /// Pipeline stages, leaf first, e.g. "shift:3,reverse"
        #[arg(
            long,
            value_parser = parse_pipeline,
            conflicts_with = "pipeline_file",
            required_unless_present = "pipeline_file"
        )]
        pipeline: Option<PipelineDescriptor>,

        /// JSON pipeline file to load instead of --pipeline
        #[arg(long)]
        pipeline_file: Option<PathBuf>,

        /// Text to transform; read from stdin when omitted
        text: Option<String>,
    },

    /// Run a byte pipeline from one file into another
    #[command(alias = "m")]
    Mask {
        /// Input file
        input: PathBuf,

        /// Output file (created or truncated)
        output: PathBuf,

        /// Mask byte, shorthand for --pipeline "mask:KEY"
        #[arg(long, value_parser = parse_mask_arg, conflicts_with_all = ["pipeline", "pipeline_file"])]
        key: Option<u8>,

        /// Pipeline stages, leaf first, e.g. "mask:0x5a,reverse"
        #[arg(long, value_parser = parse_pipeline, conflicts_with = "pipeline_file")]
        pipeline: Option<PipelineDescriptor>,

        /// JSON pipeline file to load instead of --pipeline
        #[arg(long)]
        pipeline_file: Option<PathBuf>,
    },

    /// Letter-frequency analysis of a text
    #[command(alias = "a")]
    Analyze {
        /// Text file to analyze; read from stdin when omitted
        file: Option<PathBuf>,
    },
}

fn parse_pipeline(s: &str) -> std::result::Result<PipelineDescriptor, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn parse_mask_arg(s: &str) -> std::result::Result<u8, String> {
    parse_mask(s).map_err(|e| format!("{}", e))
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    // Drop the trailing newline a shell pipe usually appends
    if buffer.ends_with('\n') {
        buffer.pop();
        if buffer.ends_with('\r') {
            buffer.pop();
        }
    }
    Ok(buffer)
}

fn run_encode(
    pipeline: Option<PipelineDescriptor>,
    pipeline_file: Option<PathBuf>,
    text: Option<String>,
) -> Result<()> {
    let descriptor = match (pipeline, pipeline_file) {
        (Some(descriptor), _) => descriptor,
        (None, Some(path)) => PipelineDescriptor::load(&path)?,
        // clap requires one of the two
        (None, None) => unreachable!("--pipeline or --pipeline-file is required"),
    };

    let text = match text {
        Some(text) => text,
        None => read_stdin()?,
    };

    let options = EncodeOptions {
        pipeline: descriptor,
    };
    println!("{}", encode_text(&text, &options)?);
    Ok(())
}

fn run_mask(
    input: PathBuf,
    output: PathBuf,
    key: Option<u8>,
    pipeline: Option<PipelineDescriptor>,
    pipeline_file: Option<PathBuf>,
) -> Result<()> {
    let descriptor = match (key, pipeline, pipeline_file) {
        (Some(mask), _, _) => Some(PipelineDescriptor::new(vec![StageDescriptor::Mask {
            mask,
        }])),
        (None, Some(descriptor), _) => Some(descriptor),
        (None, None, Some(path)) => Some(PipelineDescriptor::load(&path)?),
        (None, None, None) => None,
    };

    let options = MaskOptions {
        pipeline: descriptor,
    };
    let outcome = mask_file(&input, &output, &options)?;

    if let Some(mask) = outcome.generated_mask {
        println!("Generated mask key: 0x{}", hex::encode([mask]));
        println!("Rerun with --key 0x{} to restore", hex::encode([mask]));
    }
    println!(
        "Masked {} bytes to {} ({} stages)",
        outcome.bytes,
        output.display(),
        outcome.stages
    );
    Ok(())
}

fn run_analyze(file: Option<PathBuf>) -> Result<()> {
    let report = match file {
        Some(path) => show_analysis(&path)?,
        None => analysis_report("stdin", &read_stdin()?),
    };
    print!("{}", report);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Handle --version flag
    if cli.version {
        println!("scytale {}", get_version());
        return ExitCode::SUCCESS;
    }

    // Require a command if not showing version
    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            // Show help when no command provided
            use clap::CommandFactory;
            Cli::command().print_help().unwrap();
            println!();
            return ExitCode::SUCCESS;
        }
    };

    let result = match command {
        Commands::Encode {
            pipeline,
            pipeline_file,
            text,
        } => run_encode(pipeline, pipeline_file, text),

        Commands::Mask {
            input,
            output,
            key,
            pipeline,
            pipeline_file,
        } => run_mask(input, output, key, pipeline, pipeline_file),

        Commands::Analyze { file } => run_analyze(file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
