use clap::{Parser, Subcommand};
use seo_inventory::{audit, config, inventory, output, report};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "seo-inventory")]
#[command(about = "SEO inventory for a Next.js App Router site")]
#[command(long_about = "\
SEO inventory for a Next.js App Router site

Walks the app directory, expands blog and library routes from their content
sources, and writes one CSV row per page. Nothing is executed: metadata is
read from the page sources, so values computed at runtime show up empty.

Project structure:

  ./
  ├── seo-inventory.toml           # Config (optional)
  ├── app/
  │   ├── page.tsx                 # → /
  │   ├── (marketing)/about/       # → /about (group elided)
  │   ├── blog/[slug]/page.tsx     # replaced by one route per post
  │   └── library/[slug]/page.tsx  # replaced by one route per seed post
  └── content/
      ├── blog/*.mdx               # frontmatter: title, description, canonical, h1Title
      └── library/seed.ts          # export const librarySeedPosts = [...]

Report columns:
  route, title, meta_description, canonical, h1, robots, structured_data

Run 'seo-inventory gen-config' to generate a documented seo-inventory.toml.")]
#[command(version)]
struct Cli {
    /// Project root containing the app directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Report path (default: `output` from config, relative to root)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Config file (default: seo-inventory.toml in root, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Write the CSV report (default)
    Inventory,
    /// Print the expanded route list as JSON
    Routes,
    /// Print title, description and indexability flags; writes nothing
    Check {
        /// Audit an existing report instead of scanning the project
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Print a stock seo-inventory.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Inventory) {
        Command::Inventory => {
            let config = config::load_config(&cli.root, cli.config.as_deref())?;
            let summary = inventory::run(&cli.root, &config, cli.output.as_deref())?;
            output::print_inventory_output(&summary.rows, &summary.output);
        }
        Command::Routes => {
            let config = config::load_config(&cli.root, cli.config.as_deref())?;
            let routes = inventory::discover_routes(&cli.root, &config)?;
            println!("{}", serde_json::to_string_pretty(&routes)?);
        }
        Command::Check { csv } => {
            let config = config::load_config(&cli.root, cli.config.as_deref())?;
            let rows = match csv {
                Some(path) => report::read_csv(&path)?,
                None => inventory::build_inventory(&cli.root, &config)?,
            };
            let audits = audit::audit_rows(&rows, &config.audit, &config.site.brand_suffix);
            output::print_check_output(&audits);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
