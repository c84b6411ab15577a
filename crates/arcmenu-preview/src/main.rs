use arcmenu::{AnimationType, ItemCount, Mode};
use arcmenu_preview::config::{self, Overrides};
use arcmenu_preview::gui::app::AppModel;
use arcmenu_preview::sys::runtime;
use clap::Parser;
use relm4::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "arcmenu-preview", version, about, long_about = None)]
struct Cli {
    /// Number of items to show (1 to 10)
    #[arg(short = 'n', long)]
    items: Option<usize>,

    /// Layout mode: radial (half) or circular (ring)
    #[arg(short, long)]
    mode: Option<Mode>,

    /// Reveal animation, e.g. from_left or none
    #[arg(short, long)]
    animation: Option<AnimationType>,

    /// Write the default config file and print its path
    #[arg(long)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.init_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let overrides = Overrides {
        items: cli.items,
        mode: cli.mode,
        animation: cli.animation,
    };
    let mut config = config::load_or_default();
    overrides.apply(&mut config);
    ItemCount::new(config.items)?;

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    // GTK must not see our own arguments
    let app = RelmApp::new("org.arcmenu.preview").with_args(Vec::new());

    app.run::<AppModel>((config, overrides, rx));
    Ok(())
}
