use clap::{Parser, Subcommand};
use snapgal::gallery::Gallery;
use snapgal::paginate::parse_page_param;
use snapgal::render::{render_document, render_gallery};
use snapgal::{VERSION, config, output};
use std::path::PathBuf;

/// Page selection shared by the listing commands.
#[derive(clap::Args, Clone)]
struct PageArgs {
    /// Gallery directory to read
    dir: PathBuf,

    /// Page to show; out-of-range values are clamped, junk means page 1
    #[arg(long)]
    page: Option<String>,
}

#[derive(Parser)]
#[command(name = "snapgal")]
#[command(about = "Paged image galleries with cached square thumbnails")]
#[command(long_about = "\
Paged image galleries with cached square thumbnails

Every JPEG, PNG and GIF directly inside the gallery directory is listed in
natural order (img2 before img10). Thumbnails and directory indexes are kept
in the cache directory and reused until the index expires.

  photos/
  ├── My_Holiday.jpg        # title \"My Holiday\"
  ├── img2.png
  ├── img10.png
  └── notes.txt             # not an image, ignored

  cache/
  ├── <sha256(dir)>.index   # directory index (JSON)
  └── 100-<sha256>.jpg      # thumbnail, named by size and content

Run 'snapgal gen-config' to generate a documented config.toml.

Set RUST_LOG=debug to see cache hits and rebuilds.")]
#[command(version = VERSION)]
struct Cli {
    /// Configuration file (missing file = stock defaults)
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List one page of a gallery directory
    Page(PageArgs),
    /// Print one page of a gallery directory as an HTML document
    Html(PageArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Page(args) => {
            let config = config::load_config(&cli.config)?;
            let gallery = Gallery::open(&config)?;
            let page = gallery.page(&args.dir, parse_page_param(args.page.as_deref()))?;
            output::print_page_output(&args.dir, &page);
        }
        Command::Html(args) => {
            let config = config::load_config(&cli.config)?;
            let gallery = Gallery::open(&config)?;
            let page = gallery.page(&args.dir, parse_page_param(args.page.as_deref()))?;
            let title = args
                .dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Gallery".to_string());
            let fragment = render_gallery(&page.images, &page.stats);
            println!("{}", render_document(&title, fragment).into_string());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
