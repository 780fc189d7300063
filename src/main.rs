use clap::{Parser, Subcommand};
use listing_site::{config, output, pipeline};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shared flags for commands that read a listing.
#[derive(clap::Args, Clone)]
struct ListingArgs {
    /// Property folder containing listing.json and photos/
    #[arg(long, short)]
    input: PathBuf,

    /// Reject listings missing title, address, details, or core detail fields
    #[arg(long)]
    strict: bool,
}

#[derive(Parser)]
#[command(name = "listing-site")]
#[command(about = "Static site generator for real estate listings")]
#[command(long_about = "\
Static site generator for real estate listings

Turns a property folder into a single-page site with optimized photos.

Property folder:

  property/
  ├── listing.json          # Title, address, details, agent, SEO, theme
  ├── config.toml           # Build settings (optional)
  ├── hero.jpg              # Hero banner (optional)
  ├── agent.jpg             # Agent photo, referenced from listing.json (optional)
  └── photos/
      ├── front.jpg         # Root photos
      ├── exterior/         # One level of subfolders = categories
      │   └── porch.jpg
      └── kitchen/
          └── island.jpeg

Hero selection (first match wins):
  listing hero.image = \"hero.jpg\" and the file exists
  listing hero.image = any other photo under photos/
  hero.jpg in the property folder
  first photo in path order

Set RUST_LOG=info to follow the build stage by stage.
Run 'listing-site gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Log progress (same as RUST_LOG=info)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the listing site into an output directory (replaced on every run)
    Build {
        #[command(flatten)]
        listing: ListingArgs,

        /// Output directory
        #[arg(long, short, default_value = "site")]
        output: PathBuf,

        /// Copy support assets from this directory instead of the built-in ones
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
    /// Validate the listing and photos without writing anything
    Check {
        #[command(flatten)]
        listing: ListingArgs,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Build {
            listing,
            output: output_dir,
            static_dir,
        } => {
            let overrides = pipeline::Overrides {
                strict: listing.strict,
                static_dir,
            };
            let site_config = pipeline::load_site_config(&listing.input, &overrides)?;
            let report = pipeline::Pipeline::new(site_config).build(&listing.input, &output_dir)?;
            output::print_build_output(&report);
        }
        Command::Check { listing } => {
            let overrides = pipeline::Overrides {
                strict: listing.strict,
                static_dir: None,
            };
            let site_config = pipeline::load_site_config(&listing.input, &overrides)?;
            let report = pipeline::Pipeline::new(site_config).check(&listing.input)?;
            output::print_check_output(&report);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
