// gbc-ppu - Main Entry Point
//
// Renders the sprite layer of a saved video snapshot to a PNG and prints
// the OAM and palette state it was rendered from.

use gbc_ppu::debug::PpuDebugger;
use gbc_ppu::ppu::BlankBackground;
use gbc_ppu::session::{Session, VideoSnapshot, CONFIG_FILE};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("gbc-ppu v{}", env!("CARGO_PKG_VERSION"));
    println!("==============");
    println!();

    let mut args = std::env::args().skip(1);
    let Some(snapshot_path) = args.next() else {
        return Err("usage: gbc-ppu <snapshot.json> [config.toml]".into());
    };
    let config_path = args.next().unwrap_or_else(|| CONFIG_FILE.to_string());

    let mut session = Session::from_config_file(&config_path);
    println!("Configuration loaded from '{}'", config_path);

    let snapshot = VideoSnapshot::load_from_path(&snapshot_path)?;
    snapshot.restore(session.ppu_mut())?;
    println!(
        "Snapshot '{}' taken at {}",
        snapshot_path,
        snapshot.timestamp()
    );
    println!();

    session.render_frame(&mut BlankBackground);

    let debugger = PpuDebugger::new();
    println!("{}", debugger.capture_state(session.ppu()).format());
    print!("{}", debugger.format_oam(session.ppu(), None));
    println!();
    print!("{}", debugger.format_palettes(session.ppu()));
    println!();

    let path = session.save_screenshot()?;
    println!("Frame saved to {}", path.display());

    Ok(())
}
