//! dpma - resizable panel overlay

mod runtime;

use anyhow::Result;
use clap::Parser;
use winit::event_loop::EventLoop;

use dpma::cli::CliArgs;

use runtime::App;

fn main() -> Result<()> {
    dpma::tracing::init();

    let config = CliArgs::parse()
        .into_config()
        .map_err(|e| anyhow::anyhow!(e))?;
    tracing::debug!(?config, "starting");

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
