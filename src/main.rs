//! qrstamp command-line entrypoint

use clap::Parser;
use qrstamp::output::render_report;
use qrstamp::{GenerateRequest, Generator, LogoSource, QrstampConfig, Result, logging};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "qrstamp",
    version,
    about = "Generate a styled QR code with an optional center logo"
)]
struct Cli {
    /// Logo image to place in the center, or `none` to disable [default: logo.png]
    logo: Option<String>,

    /// Output image path; format follows the extension [default: openclaw-qrcode.png]
    output: Option<PathBuf>,

    /// Text to encode [default: the dashboard URL]
    text: Option<String>,

    /// Optional configuration file (toml/yaml). Defaults to qrstamp.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the result as JSON instead of status lines
    #[arg(long)]
    json: bool,

    /// Decode the written image and fail if it does not match the text
    #[arg(long)]
    verify: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = QrstampConfig::load(cli.config.as_deref())?;
    logging::init(&config.logging)?;

    let defaults = &config.generator;
    let logo_arg = cli.logo.unwrap_or_else(|| defaults.logo.clone());
    let request = GenerateRequest {
        text: cli.text.unwrap_or_else(|| defaults.url.clone()),
        output: cli.output.unwrap_or_else(|| defaults.output.clone()),
        logo: LogoSource::from_arg(&logo_arg),
    };

    let generator = Generator::new(defaults.to_style()?);
    let report = generator.generate(&request)?;

    if cli.verify {
        generator.verify(&report)?;
        info!(output = %report.output.display(), "Verified decoded payload");
    }

    let rendered = render_report(&report);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&rendered.json)?);
    } else {
        for line in &rendered.human {
            println!("{line}");
        }
    }

    Ok(())
}
