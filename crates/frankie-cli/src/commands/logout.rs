use anyhow::{Context, Result};

use frankie_core::Settings;

use super::new_manager;

pub fn run(settings: &Settings) -> Result<()> {
    let manager = new_manager(settings)?;
    if !manager.store().exists() {
        println!("Not logged in");
        return Ok(());
    }

    manager.logout().context("failed to logout")?;
    println!("Logged out successfully");
    Ok(())
}
