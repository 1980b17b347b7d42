use iptrack::app::{forward_lines, App, AppOptions};
use iptrack::config::{parse_config, Config};
use iptrack::map_sync::MapSync;
use iptrack::probe::LocalAddressProbe;
use iptrack::resolver::Resolver;
use iptrack::view::{self, TerminalMap};

use tokio::io::BufReader;

async fn async_main(config: Config) -> anyhow::Result<()> {
    simple_logger::init_with_level(config.log_level)?;

    let resolver = Resolver::from_config(&config.provider);
    let probe = LocalAddressProbe::from_config(&config.probe);
    let (app, handle) = App::new(resolver, probe, AppOptions::from_config(&config));

    let map_sync = tokio::spawn(MapSync::new(TerminalMap, config.map.zoom).run(handle.subscribe()));
    let screen = tokio::spawn(view::follow(handle.subscribe()));
    let app = tokio::spawn(app.run());

    forward_lines(BufReader::new(tokio::io::stdin()), &handle).await;

    // The app may already be gone if forwarding stopped on a send error
    let _ = handle.shutdown();
    drop(handle);
    app.await?;
    map_sync.await?;
    screen.await?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(config_path) => parse_config(config_path)?,
        None => Config::default(),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(config))
}
