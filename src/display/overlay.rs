//! Overlay display formatting

use crate::models::Overlay;

/// Format the overlay as a short report, one section per line group
pub fn format_overlay(overlay: &Overlay) -> String {
    if overlay.is_empty() {
        return "No display settings configured.".to_string();
    }

    let mut output = String::new();

    if !overlay.display_names.is_empty() {
        output.push_str("Display names:\n");
        for (item, name) in &overlay.display_names {
            output.push_str(&format!("  {:<12} {}\n", item, name));
        }
    }

    if !overlay.item_notes.is_empty() {
        output.push_str("Notes:\n");
        for (item, note) in &overlay.item_notes {
            output.push_str(&format!("  {:<12} {}\n", item, note));
        }
    }

    if !overlay.priority.is_empty() {
        output.push_str(&format!("Priority: {}\n", overlay.priority.join(", ")));
    }

    if !overlay.zero_exceptions.is_empty() {
        let kept: Vec<&str> = overlay.zero_exceptions.iter().map(String::as_str).collect();
        output.push_str(&format!("Kept at zero: {}\n", kept.join(", ")));
    }

    output
}
