use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_path, Settings};

pub fn show() -> Result<()> {
    let settings = load_settings();
    println!("# {}", settings_path().display());
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

pub fn init() -> Result<()> {
    let path = settings_path();
    if path.exists() {
        println!("Settings already exist at {}", path.display());
        return Ok(());
    }
    save_settings(&Settings::default())?;
    println!("Wrote {}", path.display());
    Ok(())
}
