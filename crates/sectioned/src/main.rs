use clap::{Args, Parser, Subcommand};
use sectioned::color::HexColor;
use sectioned::geometry::{Point, Rect};
use sectioned::host::SliderPalette;
use sectioned::input::position_to_section;
use sectioned::sections::SectionLayout;
use sectioned::svg::render_svg;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sectioned", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Render the slider outlines as an SVG document.
    Svg {
        #[command(flatten)]
        layout: LayoutArgs,

        /// Accent color of the active bands (#rrggbb or #rrggbbaa)
        #[arg(short, long, default_value = "#ffcc00")]
        accent: HexColor,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the section under a point and whether it hits the slider body.
    Locate {
        #[command(flatten)]
        layout: LayoutArgs,

        #[arg(short, long, allow_hyphen_values = true)]
        x: f64,

        #[arg(short, long, allow_hyphen_values = true)]
        y: f64,
    },
}

#[derive(Args, Debug, Clone)]
struct LayoutArgs {
    #[arg(long, default_value_t = 200.0)]
    width: f64,

    #[arg(long, default_value_t = 300.0)]
    height: f64,

    /// Number of bands
    #[arg(short, long, default_value_t = 10)]
    sections: usize,

    /// Zero-based selected band
    #[arg(short, long, default_value_t = 0)]
    current: usize,

    /// Use the tighter spacing of paired half sections
    #[arg(long)]
    half_sections: bool,
}

impl LayoutArgs {
    fn layout(&self) -> anyhow::Result<SectionLayout> {
        Ok(SectionLayout::new(
            Rect::from_size(self.width, self.height),
            self.sections,
            self.current,
            self.half_sections,
        )?)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Svg {
            layout,
            accent,
            output,
        } => write_svg(&layout, accent, output),
        Commands::Locate { layout, x, y } => locate(&layout, Point::new(x, y)),
    }
}

fn write_svg(args: &LayoutArgs, accent: HexColor, output: Option<PathBuf>) -> anyhow::Result<()> {
    let geometry = args.layout()?.build();
    let palette = SliderPalette {
        accent: accent.to_srgba(),
        ..SliderPalette::default()
    };
    let svg = render_svg(&geometry, &palette);

    match output {
        Some(path) => {
            fs_err::write(&path, svg)?;
            log::info!("Wrote {}", path.display());
        }
        None => print!("{}", svg),
    }
    Ok(())
}

fn locate(args: &LayoutArgs, point: Point) -> anyhow::Result<()> {
    let layout = args.layout()?;
    let geometry = layout.build();

    match position_to_section(point, layout.bounds(), layout.sections()) {
        Some(section) => println!("section: {}", section),
        None => println!("section: none"),
    }
    println!("inside: {}", geometry.body.contains(point));
    Ok(())
}
