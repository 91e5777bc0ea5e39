//! Print the events of a MIDI file, e.g. a generated setlist.
//!
//! Usage: cargo run --bin dump_midi -- path/to/setlist.mid

use anyhow::Context;
use setlist_midi::config::Config;
use setlist_midi::midi::dump::describe;

fn main() -> anyhow::Result<()> {
    let path = match std::env::args().nth(1) {
        Some(path) => std::path::PathBuf::from(path),
        None => Config::load()?.output_path,
    };

    let bytes = fs_err::read(&path)?;
    let lines = describe(&bytes).with_context(|| format!("Failed to read {}", path.display()))?;

    println!("=== {} ===", path.display());
    for line in lines {
        println!("{line}");
    }

    Ok(())
}
