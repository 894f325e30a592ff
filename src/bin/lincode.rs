use clap::{Parser, Subcommand};
use lincode::ecc::gf2::{format_word, parse_word};
use lincode::{Code, CodeParams, Error, GeneratorOptions, Result};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(name = "lincode", author, version)]
#[clap(about = "Linear error-correcting codes", long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generates a linear code with the given parameters
    Generate {
        /// Desired length of a block transmitted through the channel
        #[clap(short = 'n')]
        n: usize,

        /// Number of check digits
        #[clap(short = 'r')]
        r: usize,

        /// Probability of a bit error in the channel
        #[clap(short = 'p')]
        p: f64,

        /// File to write the code to
        #[clap(short = 'o', long = "out", default_value = "code.data")]
        out_file: PathBuf,

        /// Seed for reproducible generation
        #[clap(long)]
        seed: Option<u64>,

        /// Give up after this many rejected draws for one matrix row
        #[clap(long)]
        max_draws: Option<usize>,
    },
    /// Encodes a message and adds an error to it
    Encode {
        /// File with the generated code
        #[clap(short = 'i', long = "in")]
        in_file: PathBuf,

        /// Message to encode
        #[clap(short = 'm', long)]
        message: String,

        /// Error to add to the encoded message; random if omitted
        #[clap(short = 'e', long)]
        error: Option<String>,
    },
    /// Finds the error and decodes a received message
    Decode {
        /// File with the generated code
        #[clap(short = 'i', long = "in")]
        in_file: PathBuf,

        /// Received message to decode
        #[clap(short = 'm', long)]
        message: String,
    },
}

fn run(command: &Commands) -> Result<()> {
    match command {
        Commands::Generate {
            n,
            r,
            p,
            out_file,
            seed,
            max_draws,
        } => {
            let params = CodeParams::new(*n, *r, *p)?;
            let options = GeneratorOptions {
                seed: *seed,
                max_draws: *max_draws,
            };
            let code = Code::generate(&params, &options)?;
            println!(
                "Generated code with n = {}, k = {}, t = {}",
                code.n(),
                code.k(),
                code.t()
            );
            println!("G:\n{}", code.generator());
            println!("H:\n{}", code.parity_check()?);
            println!("Error code possibility: {}", code.word_error_probability(*p));
            code.save(out_file)
        }
        Commands::Encode {
            in_file,
            message,
            error,
        } => {
            let code = Code::load(in_file)?;
            let message = parse_word(message)?;
            let error = error.as_deref().map(parse_word).transpose()?;
            let encoded = code.encode(&message, error.as_deref())?;
            println!("Coded message: {}", format_word(&encoded.codeword));
            println!("Message with error: {}", format_word(&encoded.corrupted));
            Ok(())
        }
        Commands::Decode { in_file, message } => {
            let code = Code::load(in_file)?;
            let received = parse_word(message)?;
            println!("Encoded message: {}", format_word(&received));
            let decoded = code.decode(&received)?;
            println!("Error: {}", format_word(&decoded.error));
            println!(
                "Encoded message without error: {}",
                format_word(&decoded.corrected)
            );
            println!("Decoded message: {}", format_word(&decoded.message));
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err @ Error::InternalInconsistency(_)) => {
            error!("{}", err);
            eprintln!("Internal error, the code file is inconsistent: {}", err);
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
