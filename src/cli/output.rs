//! Terminal rendering of allocations

use crate::cli::args::OutputFormat;
use crate::error::RackResult;
use crate::plate::Allocation;
use console::style;

/// Print an allocation in the requested format
pub fn print_allocation(allocation: &Allocation, format: OutputFormat) -> RackResult<()> {
    match format {
        OutputFormat::Table => print_table(allocation),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(allocation)?),
        OutputFormat::Plain => println!("{}", allocation.achieved_weight),
    }
    Ok(())
}

fn print_table(allocation: &Allocation) {
    println!("{:<16} {:>8} {:>8}", style("PLATE").bold(), style("EACH").bold(), style("PAIRS").bold());
    println!("{}", "-".repeat(34));

    let mut loaded = false;
    for (denomination, pairs) in allocation.used.iter().filter(|(_, pairs)| *pairs > 0) {
        loaded = true;
        println!(
            "{:<16} {:>8} {:>8}",
            denomination.to_string(),
            denomination.unit_weight().to_string(),
            pairs
        );
    }
    if !loaded {
        println!("{}", style("(empty bar)").dim());
    }

    println!();
    println!("Bar:      {} lb", allocation.bar_weight);
    println!("Target:   {} lb", allocation.target);

    let achieved = format!("{} lb", allocation.achieved_weight);
    if allocation.achieved_weight.as_lbs() < allocation.target as f64 {
        println!("Achieved: {}", style(achieved).yellow());
    } else {
        println!("Achieved: {}", style(achieved).green());
    }
    println!("{}", style(&allocation.message).cyan().bold());
}
