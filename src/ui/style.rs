use console::style;
use std::fmt::Display;

/// Green bold: success banners, confirmations
pub fn success<D: Display>(text: D) -> String {
    style(text).green().bold().to_string()
}

/// Red bold: failure banners
pub fn failure<D: Display>(text: D) -> String {
    style(text).red().bold().to_string()
}

/// Red: per-field validation messages
pub fn error<D: Display>(text: D) -> String {
    style(text).red().to_string()
}

/// White bold: section headers, titles
pub fn header<D: Display>(text: D) -> String {
    style(text).white().bold().to_string()
}

/// Dim: secondary text
pub fn dim<D: Display>(text: D) -> String {
    style(text).dim().to_string()
}

/// Green: confirmed values, names
pub fn value<D: Display>(text: D) -> String {
    style(text).green().to_string()
}

/// Cyan: field labels
pub fn cyan<D: Display>(text: D) -> String {
    style(text).cyan().to_string()
}

/// Cyan underlined: URLs
pub fn url<D: Display>(text: D) -> String {
    style(text).cyan().underlined().to_string()
}
