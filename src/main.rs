use std::path::PathBuf;

use clap::{Parser, Subcommand};
use walldocs::{compose, config, output, prime, scan, store};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked exactly once, at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "walldocs")]
#[command(about = "README generator for wallpaper collections")]
#[command(long_about = "\
README generator for wallpaper collections

Your filesystem is the data source. Top-level directories are categories,
the files inside them are wallpapers, and markdown templates drive what
the generated READMEs say.

Repository structure:

  wallpapers/
  ├── .github/
  │   ├── config.ini               # Run settings + substitution variables
  │   ├── templates.json           # Seeds missing templates (never overwrites)
  │   └── templates/
  │       ├── heading.md           # Root README sections, in order:
  │       ├── body.heading.md      #   heading, body.heading,
  │       ├── body.category.md     #   body.category, sources
  │       ├── sources.md           #   (body.category renders per sampled picture)
  │       ├── category.md          # Category READMEs, rendered per picture
  │       └── category.header.md   # Optional category README heading
  ├── abstract/                    # Category
  │   ├── circuit.png
  │   └── gradient.jpg
  └── nature/
      └── mountains.png

Placeholders: any {key} from config.ini, plus {date} (injected at run
time), {category}/{random}/{random_stem} inside body.category.md, and
{category}/{filepath}/{filename} inside category.md.

Run 'walldocs print-config' for a documented config.ini.")]
#[command(version = version_string())]
struct Cli {
    /// Wallpaper repository root
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file (defaults to <root>/.github/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Regenerate the root README and every category README
    Generate {
        /// Print the would-be output as JSON instead of writing files
        #[arg(long)]
        dry_run: bool,
    },
    /// List categories and picture counts without writing
    Scan,
    /// Print a stock config.ini with all options documented
    PrintConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate { dry_run } => {
            let config_path = cli
                .config
                .unwrap_or_else(|| cli.root.join(".github/config.ini"));
            let mut config = config::load_config(&config_path)?;
            config.vars.insert(
                "date".to_string(),
                chrono::Local::now().format("%Y-%m-%d").to_string(),
            );

            let templates = store::load_templates(
                &cli.root.join(".github/templates"),
                &cli.root.join(".github/templates.json"),
            )?;
            print_warnings(&templates.warnings);

            let outcome = prime::prime(&cli.root, &config, &templates)?;
            print_warnings(&outcome.warnings);

            let generation = compose::compose(&outcome.rendered)?;
            if dry_run {
                println!("{}", generation.to_json()?);
            } else {
                generation.write(&cli.root, config.spacing)?;
                output::print_write_summary(&generation);
            }
        }
        Command::Scan => {
            let categories = scan::scan_categories(&cli.root, &[])?;
            output::print_scan_summary(&categories);
        }
        Command::PrintConfig => {
            print!("{}", config::sample_config_ini());
        }
    }

    Ok(())
}

/// Print accumulated warnings to stderr, one `Warning:` line each.
fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("Warning: {warning}");
    }
}
