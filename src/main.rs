#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use clap::Parser;
use templator_ui::app::TemplatorApp;

#[derive(Parser, Debug)]
#[command(name = "templator", about = "Templator - template and form generator client")]
struct Args {
    /// Base URL of the Templator API server
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    api_url: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 780.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Templator",
        options,
        Box::new(move |cc| Ok(Box::new(TemplatorApp::new(cc, args.api_url.clone())))),
    )
}
