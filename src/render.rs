use std::time::Instant;

use crate::models::WeatherRecord;
use crate::notify::Severity;
use crate::state::ViewState;

/// Builds the provider-hosted icon URL for a condition icon code
pub fn icon_url(icon_base: &str, icon: &str) -> String {
    format!("{}/img/wn/{}@2x.png", icon_base, icon)
}

/// Temperature as reported, with a degree sign
pub fn format_temperature(temp: f64) -> String {
    format!("{}\u{00b0}", temp)
}

/// Formats one weather card
pub fn render_card(record: &WeatherRecord, icon_base: &str) -> String {
    format!(
        "{}\n  Icon: {}\n  Conditions: {}\n  Temperature: {}\n",
        record.name,
        icon_url(icon_base, &record.icon),
        record.condition,
        format_temperature(record.temperature)
    )
}

/// Formats the whole view: form, local weather, notification and result cards
pub fn render_view(state: &ViewState, icon_base: &str, now: Instant) -> String {
    let mut output = String::from("Search Weather\n\n");

    output.push_str(&format!("City: [{}]\n", state.form.value()));
    if let Some(err) = state.form.visible_error() {
        output.push_str(&format!("  {}\n", err));
    }
    output.push('\n');

    if let Some(notification) = state.notifications.visible(now) {
        let label = match notification.severity {
            Severity::Error => "Error",
        };
        output.push_str(&format!("[{}] {}\n\n", label, notification.message));
    }

    if let Some(local) = &state.current_location {
        output.push_str("Your Location:\n");
        output.push_str(&render_card(local, icon_base));
        output.push('\n');
    }

    if state.results.is_empty() {
        output.push_str("No results yet.\n");
        return output;
    }

    for record in &state.results {
        output.push_str(&render_card(record, icon_base));
        output.push('\n');
    }
    output
}
