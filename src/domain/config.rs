use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for control tree extraction and rendering.
///
/// This struct holds the labels used to find requirement text in the source
/// tables and the fixed values stamped onto the structured document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Header label of the column that holds requirement text.
    ///
    /// Matched case-insensitively as a substring of each table's first row.
    requirements_column: String,

    /// Heading labels from other columns that sometimes bleed into the
    /// requirements column. Cells starting with one of these are skipped.
    ignored_headers: Vec<String>,

    /// Target line width for wrapped titles in the structured document.
    wrap_width: usize,

    /// Text prepended to every identifier in the structured document.
    ///
    /// For example, `Req-` renders identifier `1.1` as `Req-1.1`.
    pub id_prefix: String,

    /// Default status label for every control.
    pub status: String,

    /// Classification level assigned to every control.
    pub level: String,

    /// Explanatory paragraph added to every Notion block.
    pub notion_note: String,

    /// Static metadata emitted once at the top of the structured document.
    pub header: Header,
}

/// Static metadata describing the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Header {
    /// Policy name.
    pub policy: String,
    /// Document title.
    pub title: String,
    /// Policy identifier.
    pub id: String,
    /// Policy version.
    pub version: String,
    /// Where the source document can be found.
    pub source: String,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            policy: "PCI-DSS".to_string(),
            title: "Configuration Recommendations of a GNU/Linux System".to_string(),
            id: "pcidss_4".to_string(),
            version: "4".to_string(),
            source: "https://docs-prv.pcisecuritystandards.org/PCI%20DSS/Standard/PCI-DSS-v4_0_1.pdf"
                .to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            requirements_column: default_requirements_column(),
            ignored_headers: default_ignored_headers(),
            wrap_width: default_wrap_width(),
            id_prefix: default_id_prefix(),
            status: default_status(),
            level: default_level(),
            notion_note: default_notion_note(),
            header: Header::default(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the header label of the requirements column.
    #[must_use]
    pub fn requirements_column(&self) -> &str {
        &self.requirements_column
    }

    /// Returns the heading labels that are skipped during blob assembly.
    #[must_use]
    pub fn ignored_headers(&self) -> &[String] {
        &self.ignored_headers
    }

    /// Returns the target width for wrapped titles.
    #[must_use]
    pub const fn wrap_width(&self) -> usize {
        self.wrap_width
    }

    /// Sets the target width for wrapped titles.
    ///
    /// Widths below the minimum are raised to it.
    pub fn set_wrap_width(&mut self, width: usize) {
        self.wrap_width = width.max(MIN_WRAP_WIDTH);
    }
}

/// Narrowest allowed wrap width.
const MIN_WRAP_WIDTH: usize = 20;

fn default_requirements_column() -> String {
    "requirements and testing procedures".to_string()
}

fn default_ignored_headers() -> Vec<String> {
    [
        "Customized Approach Objective",
        "Applicability Notes",
        "Defined Approach Requirements",
    ]
    .map(String::from)
    .to_vec()
}

const fn default_wrap_width() -> usize {
    98
}

fn default_id_prefix() -> String {
    "Req-".to_string()
}

fn default_status() -> String {
    "not applicable".to_string()
}

fn default_level() -> String {
    "base".to_string()
}

fn default_notion_note() -> String {
    "This requirement was parsed from the official PCI DSS v4.0.1 PDF.".to_string()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_requirements_column")]
        requirements_column: String,

        #[serde(default = "default_ignored_headers")]
        ignored_headers: Vec<String>,

        /// Target line width for wrapped titles.
        #[serde(default = "default_wrap_width")]
        wrap_width: usize,

        #[serde(default = "default_id_prefix")]
        id_prefix: String,

        #[serde(default = "default_status")]
        status: String,

        #[serde(default = "default_level")]
        level: String,

        #[serde(default = "default_notion_note")]
        notion_note: String,

        #[serde(default)]
        header: Header,
    },
}

impl From<Versions> for super::Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                requirements_column,
                ignored_headers,
                wrap_width,
                id_prefix,
                status,
                level,
                notion_note,
                header,
            } => Self {
                requirements_column,
                ignored_headers,
                wrap_width: wrap_width.max(MIN_WRAP_WIDTH),
                id_prefix,
                status,
                level,
                notion_note,
                header,
            },
        }
    }
}

impl From<super::Config> for Versions {
    fn from(config: super::Config) -> Self {
        Self::V1 {
            requirements_column: config.requirements_column,
            ignored_headers: config.ignored_headers,
            wrap_width: config.wrap_width,
            id_prefix: config.id_prefix,
            status: config.status,
            level: config.level,
            notion_note: config.notion_note,
            header: config.header,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\nrequirements_column = \"Requirements\"\nignored_headers = [\"Guidance\"]\nwrap_width = 80\nid_prefix = \"REQ \"\n\n[header]\npolicy = \"ISO\"\nversion = \"2022\"\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.requirements_column(), "Requirements");
        assert_eq!(config.ignored_headers(), &["Guidance".to_string()]);
        assert_eq!(config.wrap_width(), 80);
        assert_eq!(config.id_prefix, "REQ ");
        assert_eq!(config.status, "not applicable");
        assert_eq!(config.header.policy, "ISO");
        assert_eq!(config.header.version, "2022");
        assert_eq!(config.header.id, "pcidss_4");
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nwrap_width = \"wide\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        // Tests that deserialising an empty file returns the default configuration.
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn narrow_wrap_width_is_clamped() {
        let actual: Config = toml::from_str("_version = \"1\"\nwrap_width = 3\n").unwrap();
        assert_eq!(actual.wrap_width(), MIN_WRAP_WIDTH);

        let mut config = Config::default();
        config.set_wrap_width(0);
        assert_eq!(config.wrap_width(), MIN_WRAP_WIDTH);
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");

        let mut config = Config::default();
        config.header.policy = "Custom".to_string();
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
