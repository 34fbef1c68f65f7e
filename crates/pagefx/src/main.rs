use std::fs;
use std::path::Path;

use clap::Parser;
use color_eyre::eyre::bail;
use log::{info, warn};
use pagefx_config::Config;
use pagefx_favicon::{FaviconConfig, FaviconRenderer, Head, paint};
use pagefx_fonts::TextBitmap;

mod app;
mod cli;
mod logging;
mod terminal;

use app::App;
use cli::{Cli, Command, FaviconArgs, ParticleArgs};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    match Config::data_dir() {
        Ok(dir) => {
            logging::init(&dir)?;
        }
        Err(err) => eprintln!("logging disabled: {err}"),
    }

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    let mut config = Config::load_from(&config_path)?;
    info!("settings from {}", config_path.display());

    match cli.command {
        None => run_particles(config, &ParticleArgs::default()),
        Some(Command::Particles(args)) => run_particles(config, &args),
        Some(Command::Favicon(args)) => {
            args.apply(&mut config.favicon);
            run_favicon(&config.favicon, &args)
        }
        Some(Command::Config { write }) => {
            print!("{}", toml::to_string_pretty(&config)?);
            if write {
                config.save_to(&config_path)?;
                eprintln!("wrote {}", config_path.display());
            }
            Ok(())
        }
    }
}

fn run_particles(mut config: Config, args: &ParticleArgs) -> color_eyre::Result<()> {
    args.apply(&mut config.particles);
    let terminal = ratatui::init();
    let size = terminal.size()?;
    let app = App::new(
        config.particles,
        args.seed,
        args.fps,
        size.width,
        size.height.saturating_sub(1),
    );
    let result = app.run(terminal);
    ratatui::restore();
    result
}

fn run_favicon(config: &FaviconConfig, args: &FaviconArgs) -> color_eyre::Result<()> {
    if config.image_url.is_none() {
        for line in TextBitmap::layout(&config.text_content).to_block_art() {
            eprintln!("{line}");
        }
    }

    let Some(link) = favicon_link(config) else {
        bail!("favicon render produced no link");
    };
    println!("{link}");

    if let Some(out) = &args.out {
        write_png(config, out)?;
    }
    Ok(())
}

/// Render into an empty head and return the installed icon link tag.
fn favicon_link(config: &FaviconConfig) -> Option<String> {
    let mut renderer = FaviconRenderer::new(Head::new());
    renderer.render(config);
    let link = renderer
        .head()
        .icon_links()
        .first()
        .map(|link| link.to_html());
    if link.is_none() {
        warn!("favicon render installed no link");
    }
    link
}

fn write_png(config: &FaviconConfig, out: &Path) -> color_eyre::Result<()> {
    if config.image_url.is_some() {
        bail!("--out needs a drawn favicon, not an image URL");
    }
    let png = paint(config)?.to_png()?;
    fs::write(out, &png)?;
    info!("wrote {} bytes to {}", png.len(), out.display());
    eprintln!("wrote {}", out.display());
    Ok(())
}
