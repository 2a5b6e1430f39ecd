use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand, ValueEnum};
use sticker_impose::schedule::{Clock, FixedClock, SystemClock, WorkCalendar};
use sticker_impose::store::{ConfigStore, FileStore, StoreToken};
use sticker_impose::{
    Artwork, CutShape, DesignConfig, Finish, InputMode, OutputIntent, ProductionMode, StickerArt,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stkr", about = "Sticker quoting and imposition CLI", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show layout, cost and delivery for a design
    Quote {
        #[command(flatten)]
        design: DesignArgs,

        /// Pin the current time (e.g. 2025-03-03T17:30:00)
        #[arg(long)]
        now: Option<NaiveDateTime>,
    },

    /// Write print and/or cut SVG files for a design
    Impose {
        #[command(flatten)]
        design: DesignArgs,

        /// Artwork image (required for print output)
        #[arg(short, long)]
        artwork: Option<PathBuf>,

        /// Which files to write
        #[arg(long, default_value = "both", value_enum)]
        intent: IntentArg,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Save a design and print its token
    Save {
        #[command(flatten)]
        design: DesignArgs,
    },
}

/// Design settings; each flag overrides the default or loaded design
#[derive(Args)]
struct DesignArgs {
    /// Start from a saved design
    #[arg(long)]
    load: Option<String>,

    /// Directory of saved designs
    #[arg(long, default_value = ".stkr")]
    store: PathBuf,

    /// Sticker width in cm
    #[arg(short = 'W', long)]
    width: Option<f64>,

    /// Sticker height in cm
    #[arg(short = 'H', long)]
    height: Option<f64>,

    /// Number of stickers
    #[arg(short, long)]
    quantity: Option<u32>,

    /// Run length in cm (roll-fed modes; switches to length input)
    #[arg(long)]
    length: Option<f64>,

    /// Production mode
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Lamination (sheet-fed modes)
    #[arg(long, value_enum)]
    finish: Option<FinishArg>,

    /// Cut shape
    #[arg(long, value_enum)]
    shape: Option<ShapeArg>,

    /// Corner radius in mm for rounded shapes
    #[arg(long)]
    corner_radius: Option<f64>,

    /// Outline path in a 100×100 space, used by the contour shape
    #[arg(long)]
    cut_path: Option<String>,

    /// Background fill behind the artwork
    #[arg(long)]
    background: Option<String>,

    /// Gap between stickers in mm (roll-fed modes)
    #[arg(long)]
    spacing: Option<f64>,

    /// Add a protective container (DTF)
    #[arg(long)]
    container: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Press,
    Plotter,
    Dtf,
    Holo,
}

#[derive(Clone, Copy, ValueEnum)]
enum FinishArg {
    None,
    Gloss,
    Matte,
}

#[derive(Clone, Copy, ValueEnum)]
enum ShapeArg {
    Contour,
    Rectangle,
    Rounded,
    Ellipse,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum IntentArg {
    Print,
    Cut,
    Both,
}

impl From<ModeArg> for ProductionMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Press => Self::Press,
            ModeArg::Plotter => Self::Plotter,
            ModeArg::Dtf => Self::DtfUv,
            ModeArg::Holo => Self::HoloUv,
        }
    }
}

impl From<FinishArg> for Finish {
    fn from(arg: FinishArg) -> Self {
        match arg {
            FinishArg::None => Self::None,
            FinishArg::Gloss => Self::Gloss,
            FinishArg::Matte => Self::Matte,
        }
    }
}

impl From<ShapeArg> for CutShape {
    fn from(arg: ShapeArg) -> Self {
        match arg {
            ShapeArg::Contour => Self::Contour,
            ShapeArg::Rectangle => Self::Rectangle,
            ShapeArg::Rounded => Self::RoundedRectangle,
            ShapeArg::Ellipse => Self::Ellipse,
        }
    }
}

impl IntentArg {
    fn intents(self) -> &'static [OutputIntent] {
        match self {
            IntentArg::Print => &[OutputIntent::Print],
            IntentArg::Cut => &[OutputIntent::Cut],
            IntentArg::Both => &[OutputIntent::Print, OutputIntent::Cut],
        }
    }
}

impl DesignArgs {
    async fn open_store(&self) -> Result<FileStore> {
        FileStore::open(&self.store)
            .await
            .with_context(|| format!("cannot open design store {}", self.store.display()))
    }

    /// Resolve the design: saved or default, then flag overrides
    async fn resolve(&self) -> Result<DesignConfig> {
        let mut config = match &self.load {
            Some(token) => {
                let store = self.open_store().await?;
                let config = store
                    .load(&StoreToken::new(token.as_str()))
                    .await
                    .with_context(|| format!("cannot load design {}", token))?;
                log::info!("loaded design {}", token);
                config
            }
            None => DesignConfig::default(),
        };

        if let Some(width) = self.width {
            config.width_cm = width;
        }
        if let Some(height) = self.height {
            config.height_cm = height;
        }
        if let Some(quantity) = self.quantity {
            config.quantity = quantity;
            config.input_mode = InputMode::Quantity;
        }
        if let Some(length) = self.length {
            config.run_length_cm = length;
            config.input_mode = InputMode::Length;
        }
        if let Some(mode) = self.mode {
            config.mode = mode.into();
        }
        if let Some(finish) = self.finish {
            config.finish = finish.into();
        }
        if let Some(shape) = self.shape {
            config.shape = shape.into();
        }
        if let Some(radius) = self.corner_radius {
            config.corner_radius_mm = radius;
        }
        if let Some(path) = &self.cut_path {
            config.cut_path = Some(path.clone());
        }
        if let Some(background) = &self.background {
            config.background_color = Some(background.clone());
        }
        if let Some(spacing) = self.spacing {
            config.spacing_mm = spacing;
        }
        if self.container {
            config.container = true;
        }

        config.validate()?;
        Ok(config)
    }
}

fn print_estimate(config: &DesignConfig, clock: &dyn Clock) -> Result<()> {
    let estimate = sticker_impose::estimate(config, &WorkCalendar::default(), clock)?;
    print!("{}", estimate.quote_message());
    if !estimate.is_feasible() {
        bail!("cannot produce this sticker on {}", config.mode.name());
    }
    if let Some(minutes) = estimate.production_minutes {
        println!("Production time: {} min", minutes);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Quote { design, now } => {
            let config = design.resolve().await?;
            log::debug!("quoting {:?}", config);
            match now {
                Some(now) => print_estimate(&config, &FixedClock(now))?,
                None => print_estimate(&config, &SystemClock)?,
            }
        }

        Commands::Impose {
            design,
            artwork,
            intent,
            out_dir,
        } => {
            let config = design.resolve().await?;
            let solution = sticker_impose::calculate_layout(
                &config.item(),
                config.mode,
                config.demand(),
                config.spacing_mm,
            );
            if !solution.is_feasible() {
                bail!(
                    "cannot produce a {}×{} cm sticker on {}",
                    config.width_cm,
                    config.height_cm,
                    config.mode.name()
                );
            }

            let artwork = match &artwork {
                Some(path) => Some(Artwork::load(path).await?),
                None => None,
            };
            if let Some(advisory) = artwork
                .as_ref()
                .and_then(|art| art.resolution_advisory(&config.item(), config.mode))
            {
                log::warn!("{}", advisory);
            }

            let geometry = config.cut_geometry();
            let art = StickerArt {
                geometry: &geometry,
                artwork_href: artwork.as_ref().map(|art| art.href.as_str()),
                background: config.background_color.as_deref(),
            };

            tokio::fs::create_dir_all(&out_dir).await?;
            for &output in intent.intents() {
                if output == OutputIntent::Print && artwork.is_none() {
                    bail!("print output needs --artwork");
                }
                let document = sticker_impose::render_imposition(
                    &solution,
                    config.mode.template(),
                    &art,
                    output,
                )?;
                let path = out_dir.join(sticker_impose::download_filename(
                    &config, &solution, output,
                ));
                sticker_impose::save_svg(document, &path).await?;
                println!("{} → {}", output.label(), path.display());
            }
        }

        Commands::Save { design } => {
            let config = design.resolve().await?;
            let mut store = design.open_store().await?;
            let token = store.save(&config).await?;
            println!("{}", token);
        }
    }

    Ok(())
}
