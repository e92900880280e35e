use album_press::album::{self, BuildEvent, DEFAULT_FILENAME};
use album_press::manifest;
use album_press::resource::FsLoader;
use album_press::style::StylePalette;
use album_press::thumbs;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "album-press")]
#[command(about = "Compose decorated PDF albums from a photo directory")]
#[command(long_about = "\
Compose decorated PDF albums from a photo directory

Your photo directory is the data source. A flat images.json manifest indexes
it, a selection (explicit paths, or a JSON list) picks the photos, and the
build lays them out as a landscape A4 album:

  Cover → contact sheet → one page per photo → closing page

Selections are capped at 16 photos; longer lists are truncated. A photo that
fails to decode aborts the build — no partial albums are ever written.
Missing capture dates or GPS positions never fail a build; those captions
degrade quietly.

Selection file shapes (for --list):

  [\"dawn.jpg\", \"dusk.jpg\"]               # flat array, in album order
  {\"filenames\": [\"best.jpg\", ...]}       # search response, ranked

Run 'album-press scan' to (re)build the images.json manifest and
'album-press thumbs' to pre-generate grid thumbnails.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct BuildArgs {
    /// Photo files for the album, in page order
    photos: Vec<String>,

    /// JSON selection file (flat array or {"filenames": [...]})
    #[arg(long, conflicts_with = "photos")]
    list: Option<PathBuf>,

    /// Photo directory that --list filenames are relative to
    #[arg(long, default_value = "public/images")]
    images: PathBuf,

    /// Output PDF path
    #[arg(long, default_value = DEFAULT_FILENAME)]
    out: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Build a PDF album from a photo selection
    Build(BuildArgs),
    /// Scan a photo directory into an images.json manifest
    Scan {
        /// Photo directory to index
        #[arg(long, default_value = "public/images")]
        images: PathBuf,
        /// Manifest path to write
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Pre-generate grid thumbnails for a photo directory
    Thumbs {
        /// Photo directory to read
        #[arg(long, default_value = "public/images")]
        images: PathBuf,
        /// Thumbnail directory to write
        #[arg(long, default_value = "public/thumbnails")]
        out: PathBuf,
        /// Thumbnail width in pixels
        #[arg(long, default_value_t = thumbs::THUMBNAIL_WIDTH)]
        width: u32,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build(args) => {
            let selection = match &args.list {
                Some(list) => {
                    let names = manifest::read_selection(list)?;
                    names
                        .iter()
                        .map(|n| args.images.join(n).to_string_lossy().into_owned())
                        .collect()
                }
                None => args.photos.clone(),
            };

            println!("==> Building album from {} photo(s)", selection.len());
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    print_build_event(&event);
                }
            });
            let pages = album::build_to_file(
                &FsLoader,
                &selection,
                &StylePalette::default(),
                &args.out,
                Some(tx),
            )?;
            printer.join().unwrap();
            println!("==> Wrote {} ({pages} pages)", args.out.display());
        }
        Command::Scan { images, out } => {
            let out = out.unwrap_or_else(|| images.join(manifest::MANIFEST_FILENAME));
            println!("==> Scanning {}", images.display());
            let names = manifest::write_manifest(&images, &out)?;
            println!("==> Wrote {} ({} images)", out.display(), names.len());
        }
        Command::Thumbs { images, out, width } => {
            println!("==> Thumbnails {} → {}", images.display(), out.display());
            let report = thumbs::generate_thumbnails(&images, &out, width)?;
            for (name, reason) in &report.failures {
                eprintln!("  skipped {name}: {reason}");
            }
            println!(
                "==> Wrote {} thumbnail(s), {} skipped",
                report.written.len(),
                report.failures.len()
            );
        }
    }

    Ok(())
}

fn print_build_event(event: &BuildEvent) {
    match event {
        BuildEvent::Loading { photos } => println!("  loading {photos} photo(s)"),
        BuildEvent::Loaded => println!("  all photos decoded"),
        BuildEvent::PageComposed { index, total, label } => {
            println!("  page {index}/{total}: {label}")
        }
        BuildEvent::Finalized { pages } => println!("  finalized {pages} pages"),
    }
}
