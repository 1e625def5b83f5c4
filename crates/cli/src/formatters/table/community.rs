//! Community index formatter, grouped by category.

use signoz_client::CommunityDashboard;

pub fn format_community(entries: &[CommunityDashboard]) -> String {
    if entries.is_empty() {
        return "No community dashboards available.".to_string();
    }

    let width = entries.len().to_string().len();
    let mut output = String::new();
    let mut current: Option<&str> = None;

    for (i, entry) in entries.iter().enumerate() {
        if current != Some(entry.category.as_str()) {
            if current.is_some() {
                output.push('\n');
            }
            output.push_str(&format!("{}\n", entry.category));
            current = Some(&entry.category);
        }
        output.push_str(&format!("  {:>width$}. {}\n", i + 1, entry.name));
    }
    output
}
