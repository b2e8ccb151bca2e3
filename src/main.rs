use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use greeble::{CodeGenerator, profile};

#[derive(Parser)]
#[command(name = "greeble")]
#[command(about = "Generate plausible-looking fake C source")]
struct Cli {
    /// Generation profile (embedded name, or path to a TOML file)
    #[arg(long, default_value = "default")]
    profile: String,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Number of programs to generate
    #[arg(long, default_value_t = 1)]
    count: usize,

    /// Prefix each program with a fake file-name comment
    #[arg(long)]
    banner: bool,

    /// Write output to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let params = match profile::get_profile(&cli.profile) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Determine seed - use provided or generate from current time
    let seed = cli.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });

    let mut generator = CodeGenerator::seeded(params, seed);

    let mut out = String::new();
    for i in 0..cli.count {
        if cli.banner {
            match generator.random_name() {
                Ok(name) => out.push_str(&format!("// {name}.c\n")),
                Err(e) => {
                    eprintln!("error: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
        let text = match generator.random_program().and_then(|p| p.render()) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        };
        out.push_str(&text);
        out.push('\n');
        if i + 1 < cli.count {
            out.push('\n');
        }
    }

    match &cli.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &out) {
                eprintln!("error: failed to write '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
            println!("greeble: generated {} program(s)", cli.count);
            println!("  seed:    {seed}");
            println!("  profile: {}", cli.profile);
            println!("  output:  {}", path.display());
        }
        None => print!("{out}"),
    }

    ExitCode::SUCCESS
}
