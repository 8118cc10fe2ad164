mod app;
mod cli;
mod labels;
mod matrix_text;
mod panel;
mod preset;
mod selector;
mod session;
mod shape;

use anyhow::Result;
use clap::Parser;
use xform_engine::device::GpuInit;
use xform_engine::logging::init_logging;
use xform_engine::window::Runtime;

use crate::app::DemoApp;
use crate::cli::Args;
use crate::preset::Preset;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.logging_config());

    for preset in Preset::ALL {
        let [letter, number] = preset.shortcuts();
        log::info!("{letter} / {number}: {preset}");
    }
    log::info!("esc: quit");

    let font = labels::load_font(args.font.as_deref());
    let app = DemoApp::new(args.title.clone(), args.preset, font);
    Runtime::run(args.runtime_config(), GpuInit::default(), app)
}
