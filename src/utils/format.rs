//! Table formatting and output utilities
//!
//! Renders parameter sets, schema listings and bound configuration in the
//! output formats selectable on the command line.

use crate::config::{env_var_for_property, JsfProperties};
use crate::error::Result;
use crate::export::{ParameterSet, SchemaEntry};
use clap::ValueEnum;
use crossterm::terminal::size;
use serde::Serialize;
use tabled::{
    settings::{object::Rows, Alignment, Color, Modify, Padding, Style, Width},
    Table, Tabled,
};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
    /// `key=value` lines, Java properties escaping
    Properties,
    /// `export NAME='value'` lines for POSIX shells
    Env,
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct ParameterRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct SchemaRow {
    #[tabled(rename = "Property")]
    property: String,
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Value")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[tabled(display_with = "display_option")]
    value: Option<String>,
    #[tabled(rename = "Description")]
    description: String,
}

fn display_option(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

impl From<&SchemaEntry> for SchemaRow {
    fn from(entry: &SchemaEntry) -> Self {
        Self {
            property: entry.path.clone(),
            key: entry.key.to_string(),
            kind: entry.kind.to_string(),
            value: entry.value.clone(),
            description: entry.description.to_string(),
        }
    }
}

/// Table formatter with color support
pub struct TableFormatter {
    format: OutputFormat,
    no_color: bool,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new(format: OutputFormat, no_color: bool) -> Self {
        Self { format, no_color }
    }

    pub fn format_parameters(&self, parameters: &ParameterSet) -> Result<String> {
        match self.format {
            OutputFormat::Table => {
                if parameters.is_empty() {
                    return Ok("No parameters to export".to_string());
                }
                let rows: Vec<ParameterRow> = parameters
                    .iter()
                    .map(|(key, value)| ParameterRow {
                        key: key.to_string(),
                        value: value.to_string(),
                    })
                    .collect();
                Ok(self.format_as_table(&rows))
            }
            OutputFormat::Json => Ok(serde_json::to_string_pretty(parameters)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(parameters)?),
            OutputFormat::Properties => Ok(parameters
                .iter()
                .map(|(key, value)| {
                    format!("{}={}", escape_property(key, true), escape_property(value, false))
                })
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Env => Ok(parameters
                .iter()
                .map(|(key, value)| format!("export {}={}", env_var_name(key), shell_quote(value)))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    pub fn format_schema(&self, entries: &[SchemaEntry]) -> Result<String> {
        let rows: Vec<SchemaRow> = entries.iter().map(SchemaRow::from).collect();
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&rows)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(&rows)?),
            OutputFormat::Properties => Ok(rows
                .iter()
                .map(|row| {
                    format!(
                        "# {} ({})\n{}={}",
                        row.description,
                        row.kind,
                        escape_property(&row.property, true),
                        escape_property(row.value.as_deref().unwrap_or(""), false)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Env => Ok(rows
                .iter()
                .map(|row| {
                    format!(
                        "# {}\n{}={}",
                        row.key,
                        env_var_for_property(&row.property),
                        shell_quote(row.value.as_deref().unwrap_or(""))
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => Ok(self.format_as_table(&rows)),
        }
    }

    pub fn format_properties(&self, properties: &JsfProperties) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(properties)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(properties)?),
            _ => Ok(toml::to_string_pretty(properties)?),
        }
    }

    /// Format data as a styled table
    fn format_as_table<T: Tabled>(&self, data: &[T]) -> String {
        let mut table = Table::new(data);

        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .with(Padding::new(1, 1, 0, 0));

        if !self.no_color {
            table.with(Modify::new(Rows::first()).with(Color::FG_BLUE));
        }

        // Auto-adjust width to terminal
        if let Ok((width, _)) = size() {
            table.with(Width::wrap(width as usize));
        }

        table.to_string()
    }
}

/// Escape a key or value for a Java properties file
pub fn escape_property(text: &str, is_key: bool) -> String {
    let mut escaped = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '=' | ':' | '#' | '!' if is_key => {
                escaped.push('\\');
                escaped.push(c);
            }
            ' ' if is_key || i == 0 => escaped.push_str("\\ "),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Map an export key onto a portable environment variable name
pub fn env_var_name(key: &str) -> String {
    let name: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();

    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", name)
    } else {
        name
    }
}

/// Single-quote a value for POSIX shells
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ParameterExporter;

    fn default_parameters() -> ParameterSet {
        ParameterExporter::new()
            .export(&JsfProperties::default())
            .unwrap()
    }

    #[test]
    fn test_escape_property() {
        assert_eq!(escape_property("a=b", true), "a\\=b");
        assert_eq!(escape_property("a=b", false), "a=b");
        assert_eq!(escape_property(" lead", false), "\\ lead");
        assert_eq!(escape_property("c:\\dir", false), "c:\\\\dir");
        assert_eq!(escape_property("two\nlines", false), "two\\nlines");
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(env_var_name("primefaces.THEME"), "PRIMEFACES_THEME");
        assert_eq!(env_var_name("javax.faces.PROJECT_STAGE"), "JAVAX_FACES_PROJECT_STAGE");
        assert_eq!(env_var_name("1st.key"), "_1ST_KEY");
    }

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("plain"), "'plain'");
        assert_eq!(shell_quote("it's"), "'it'\\''s'");
    }

    #[test]
    fn test_properties_output_keeps_export_order() {
        let formatter = TableFormatter::new(OutputFormat::Properties, true);
        let output = formatter.format_parameters(&default_parameters()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "primefaces.THEME=aristo");
        assert!(lines.contains(&"primefaces.SUBMIT=full"));
    }

    #[test]
    fn test_json_output() {
        let formatter = TableFormatter::new(OutputFormat::Json, true);
        let output = formatter.format_parameters(&default_parameters()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["primefaces.THEME"], "aristo");
        assert_eq!(value["primefaces.RESET_VALUES"], "false");
    }

    #[test]
    fn test_env_output() {
        let formatter = TableFormatter::new(OutputFormat::Env, true);
        let output = formatter.format_parameters(&default_parameters()).unwrap();
        assert!(output.contains("export PRIMEFACES_THEME='aristo'"));
    }

    #[test]
    fn test_schema_env_names_match_binder() {
        let entries = crate::export::describe_schema(&JsfProperties::default(), "jsf").unwrap();
        let formatter = TableFormatter::new(OutputFormat::Env, true);
        let output = formatter.format_schema(&entries).unwrap();
        assert!(output.contains("\nJSF_PRIMEFACES__MOBILE__THEME=''"));
        assert!(output.contains("\nJSF_PRIMEFACES__THEME='aristo'"));
    }

    #[test]
    fn test_empty_table() {
        let formatter = TableFormatter::new(OutputFormat::Table, true);
        let output = formatter.format_parameters(&ParameterSet::new()).unwrap();
        assert_eq!(output, "No parameters to export");
    }
}
