use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(
    name = "repmark",
    version,
    about = "Render a YAML-described decal sheet to PNG plus bounding-box listings"
)]
struct Cli {
    /// Input decal configuration (YAML).
    #[arg(long)]
    yaml: PathBuf,

    /// Outline every bounding box in red on the rendered image (also enabled by the
    /// configuration's `draw_bboxes`).
    #[arg(long)]
    draw_bboxes: bool,

    /// Directory for the output artifacts (overrides `output.dir` in the configuration).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Extra directory to load fonts from (repeatable).
    #[arg(long = "fonts-dir")]
    fonts_dirs: Vec<PathBuf>,

    /// Skip scanning the system font directories.
    #[arg(long)]
    no_system_fonts: bool,

    /// Print every element's bounding box to stdout, one `<text>\t<x_min>,<y_min>,<x_max>,<y_max>`
    /// line per element.
    #[arg(long)]
    log_bboxes: bool,

    /// Print diagnostics about font resolution (family name + SHA-256 of font bytes).
    #[arg(long)]
    dump_fonts: bool,

    /// Log pipeline progress to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let load = repmark::LoadOptions {
        system_fonts: !cli.no_system_fonts,
        font_dirs: cli.fonts_dirs.clone(),
    };
    let loaded = repmark::load_config(&cli.yaml, &load)
        .with_context(|| format!("load configuration '{}'", cli.yaml.display()))?;

    if cli.dump_fonts {
        dump_fonts(&loaded);
    }

    let opts = repmark::RenderOptions {
        draw_bboxes: cli.draw_bboxes,
    };
    let (boxes, report) = repmark::run_loaded(&loaded, &opts, cli.out_dir.as_deref())?;

    for (_, path) in &report.written {
        eprintln!("wrote {}", path.display());
    }
    if cli.log_bboxes {
        let entries = repmark::describe_boxes(&boxes, &loaded.config.elements);
        print!("{}", repmark::format_bbox_listing(&entries));
    }
    report.into_result()?;

    eprintln!("{} bounding box(es)", boxes.len());
    Ok(())
}

fn init_logging(verbose: bool) {
    if !verbose {
        return;
    }
    if let Err(e) = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
    {
        eprintln!("warn: could not install log subscriber: {e}");
    }
}

fn dump_fonts(loaded: &repmark::LoadedConfig) {
    eprintln!("text font diagnostics:");
    for (font_ref, font) in loaded.fonts.iter() {
        eprintln!("  {font_ref}:");
        eprintln!("    family:      {}", font.family);
        eprintln!("    face index:  {}", font.index);
        eprintln!("    sha256:      {}", sha256_hex(&font.data));
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
