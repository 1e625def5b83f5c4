//! Dashboards table formatter.

use crate::formatters::common::format_missing;
use signoz_client::Dashboard;

/// Format dashboards as a tab-separated table.
pub fn format_dashboards(dashboards: &[Dashboard]) -> String {
    if dashboards.is_empty() {
        return "No dashboards found.".to_string();
    }

    let mut output = String::from("UUID\tTitle\tCreated By\n");
    for dashboard in dashboards {
        let title = if dashboard.title.is_empty() {
            "Untitled"
        } else {
            &dashboard.title
        };
        output.push_str(&format!(
            "{}\t{}\t{}\n",
            dashboard.id,
            title,
            format_missing(dashboard.created_by.as_deref())
        ));
    }
    output.push_str(&format!("\n{} dashboard(s)\n", dashboards.len()));
    output
}
