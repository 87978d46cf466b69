use anyhow::Result;
use colored::*;
use minimake_core::Make;

pub fn execute(make: &Make) -> Result<()> {
    println!("{}", "Target dependency graph:".bold().underline());
    println!();

    for name in make.target_names() {
        let Some(target) = make.target(&name) else {
            continue;
        };

        println!("{}", name.blue().bold());
        if target.dependencies.is_empty() {
            println!("  {}", "no dependencies".dimmed());
        } else {
            println!(
                "  {} {}",
                "depends on:".dimmed(),
                target.dependencies.join(", ")
            );
        }
        println!();
    }

    Ok(())
}
