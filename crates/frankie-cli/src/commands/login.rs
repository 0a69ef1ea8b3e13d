use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::Args;

use frankie_core::Settings;

use super::new_manager;

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Email address
    #[arg(short, long)]
    email: Option<String>,

    /// Password (prompted for when omitted)
    #[arg(short, long)]
    password: Option<String>,
}

fn prompt_line(label: &str) -> Result<String> {
    eprint!("{}: ", label);
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim().to_string())
}

pub async fn run(settings: &Settings, args: LoginArgs) -> Result<()> {
    let email = match args.email.filter(|e| !e.is_empty()) {
        Some(email) => email,
        None => prompt_line("Email")?,
    };
    let password = match args.password.filter(|p| !p.is_empty()) {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ").context("Failed to read password")?,
    };

    if email.is_empty() || password.is_empty() {
        bail!("email and password are required");
    }

    let manager = new_manager(settings)?;
    manager.login(&email, &password).await?;

    println!("Login successful!");
    Ok(())
}
