use anyhow::Result;
use colored::*;
use minimake_core::Make;

pub fn execute(make: &Make, target: &str) -> Result<()> {
    let order = make.dependency_order(target)?;

    println!("{} {}", "Execution plan for".bold(), target.cyan().bold());
    println!();
    for (position, name) in order.iter().enumerate() {
        if make.target(name).is_some() {
            println!("  {}. {}", position + 1, name);
        } else {
            println!("  {}. {} {}", position + 1, name, "(no rule)".red());
        }
    }

    Ok(())
}
