use clap::Parser;
use ksslider::config;
use ksslider::gui::app::{AppInit, AppModel};
use ksslider::sys::runtime;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ksslider", version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of the per-user default
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the default config file (if missing), print its path and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::get_config_path()?,
    };

    if cli.init_config {
        let path = config::write_default_config(&config_path)?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default(&config_path);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(config_path.clone(), tx);

    // GTK would otherwise try to parse our own flags
    let app = RelmApp::new("org.ksslider.demo").with_args(Vec::new());

    app.run::<AppModel>(AppInit {
        config,
        config_path,
        events: rx,
    });
    Ok(())
}
