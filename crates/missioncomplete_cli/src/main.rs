//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `missioncomplete_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use missioncomplete_core::{Subtask, Task, TaskLocation};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("missioncomplete_core ping={}", missioncomplete_core::ping());
    println!(
        "missioncomplete_core version={}",
        missioncomplete_core::core_version()
    );

    // Fixed sample task so the display block and JSON stay diff-stable.
    let mut task = Task::new(
        "Buy milk",
        Some("2% if they have it".to_string()),
        Some(1_700_000_000_000),
        None,
        false,
        Some(TaskLocation::new(40.44, -79.94)),
    )?;
    task.add_subtask(Subtask::new("find the dairy aisle"));
    task.add_subtask(Subtask::with_completed("bring a bag", true));

    println!("--- display ---");
    println!("{task}");
    println!("--- json ---");
    println!("{}", serde_json::to_string_pretty(&task)?);

    Ok(())
}
