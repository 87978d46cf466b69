use anyhow::Result;
use colored::*;
use minimake_core::Make;

pub fn execute(make: &Make) -> Result<()> {
    let names = make.target_names();
    if names.is_empty() {
        println!("{}", "No targets defined".dimmed());
        return Ok(());
    }

    println!("{}", "Targets:".bold().underline());
    for name in names {
        let count = make.target(&name).map_or(0, |target| target.commands.len());
        let label = if count == 1 { "command" } else { "commands" };
        println!(
            "  {} {}",
            name.blue().bold(),
            format!("({} {})", count, label).dimmed()
        );
    }

    Ok(())
}
