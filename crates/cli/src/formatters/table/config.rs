//! Saved configuration formatter.

use crate::formatters::ConfigView;
use crate::formatters::common::format_missing;

pub fn format_config(view: &ConfigView) -> String {
    let location = view.config_location.display();
    if !view.is_logged_in() {
        return format!("No configuration found. Please login first.\nConfig Location: {location}\n");
    }

    let last_login = view
        .last_login
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "Never".to_string());

    let mut output = String::new();
    output.push_str(&format!("Email: {}\n", format_missing(view.email.as_deref())));
    output.push_str(&format!("URL: {}\n", format_missing(view.base_url.as_deref())));
    output.push_str(&format!("Last Login: {last_login}\n"));
    output.push_str(&format!(
        "Token: {}\n",
        format_missing(view.token.as_deref())
    ));
    output.push_str(&format!("Config Location: {location}\n"));
    output
}
