use clap::{Parser, Subcommand};
use simple_inline::config::{self, InlineConfig, PathOverrides};
use simple_inline::{inline, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "simple-inline")]
#[command(about = "Inline image assets into an HTML template as data URIs")]
#[command(long_about = "\
Inline image assets into an HTML template as data URIs

Each placeholder token in the template is replaced by the image whose file
name starts with the token's prefix. The result is a single HTML file with
no external image references.

Project structure:

  project/
  ├── inline.toml                  # Config (optional, see gen-config)
  ├── template_v3.html             # Template: <img src=\"__TITLE_IMG__\">
  ├── assets/images/
  │   ├── tss_title_card_gold_v2.png  # Matches prefix tss_title_card_gold
  │   └── ...
  └── TSS_PV_Final.html            # Written by build

Placeholders without a matching image are left in place and reported.

Run 'simple-inline gen-config' to generate a documented inline.toml.")]
#[command(version)]
struct Cli {
    /// Project root: holds inline.toml, relative paths resolve against it
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Template document, relative to --root (overrides inline.toml)
    #[arg(long, global = true)]
    template: Option<PathBuf>,

    /// Image directory, relative to --root (overrides inline.toml)
    #[arg(long, global = true)]
    images: Option<PathBuf>,

    /// Output document, relative to --root (overrides inline.toml)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inline all assets and write the output document
    Build {
        /// Fail without writing output if any asset is missing
        #[arg(long)]
        strict: bool,
    },
    /// Report which assets resolve, without writing anything
    Check {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock inline.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Build { strict } => {
            let mut config = load(&cli)?;
            if *strict {
                config.fail_on_missing = true;
            }
            let report = inline::inline(&config, &cli.root)?;
            let paths = config.resolve_paths(&cli.root);
            output::print_inline_output(
                &report,
                &paths.template,
                &token_order(&config),
                &config.extension,
            );
        }
        Command::Check { json } => {
            let config = load(&cli)?;
            let report = inline::check(&config, &cli.root)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_check_output(&report, &config.extension);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `inline.toml` from the root and apply CLI path overrides.
fn load(cli: &Cli) -> Result<InlineConfig, config::ConfigError> {
    let mut config = config::load_config(&cli.root)?;
    PathOverrides {
        template: cli.template.clone(),
        image_dir: cli.images.clone(),
        output: cli.output.clone(),
    }
    .apply(&mut config);
    Ok(config)
}

fn token_order(config: &InlineConfig) -> Vec<&str> {
    config
        .placeholders
        .iter()
        .map(|p| p.token.as_str())
        .collect()
}
