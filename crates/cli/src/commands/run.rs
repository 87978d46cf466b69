use anyhow::Result;
use colored::*;
use minimake_core::Make;

pub fn execute(make: &Make, target: &str) -> Result<()> {
    make.run(target)?;

    println!();
    println!(
        "{} {}",
        "✓".green().bold(),
        format!("Target '{}' completed", target).green().bold()
    );

    Ok(())
}
