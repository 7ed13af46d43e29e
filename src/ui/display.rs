//! Display functions for registry reconciliation

use console::Style;

use crate::registry::RegistryDiff;

/// Print what overwriting the local registry would change
pub fn display_registry_diff(diff: &RegistryDiff) {
    println!("{}", Style::new().bold().apply_to("Remote registry differs:"));
    display_names("added", &diff.added, &Style::new().green());
    display_names("changed", &diff.changed, &Style::new().yellow());
    display_names("removed", &diff.removed, &Style::new().red());

    if !diff.removed.is_empty() {
        super::warn(format!(
            "{} local-only project(s) will be lost if the registry is overwritten",
            diff.removed.len()
        ));
    }
}

fn display_names(label: &str, names: &[String], style: &Style) {
    for name in names {
        println!("  {} {name}", style.apply_to(format!("{label}:")));
    }
}
