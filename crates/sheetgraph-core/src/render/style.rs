//! Plot style defaults and override files.
//!
//! Defaults depend on graph size: larger graphs get smaller, more transparent
//! nodes. A JSON (or TOML, by extension) file can override any key.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::error::{Result, SheetGraphError};

const MAX_STYLE_FILE_BYTES: u64 = 1_048_576; // 1 MiB
const SMALL_GRAPH_NODES: usize = 200;
const MEDIUM_GRAPH_NODES: usize = 500;
const BASE_FIGURE_INCHES: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeTier {
    Small,
    Medium,
    Large,
}

impl SizeTier {
    pub fn for_node_count(nodes: usize) -> SizeTier {
        if nodes < SMALL_GRAPH_NODES {
            SizeTier::Small
        } else if nodes < MEDIUM_GRAPH_NODES {
            SizeTier::Medium
        } else {
            SizeTier::Large
        }
    }
}

/// Resolved drawing style.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StyleConfig {
    /// Node area in square points.
    pub node_size: f64,
    /// Edge stroke width.
    pub width: f64,
    pub edge_color: String,
    /// Node border stroke width.
    pub linewidths: f64,
    pub with_labels: bool,
    pub font_size: f64,
    /// Color map used to tell sheets apart.
    pub cmap: String,
    pub alpha: f64,
    /// Figure size in inches; computed from the graph size when unset.
    pub fig_size: Option<[f64; 2]>,
}

/// Partial style as read from an override file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleOverride {
    pub node_size: Option<f64>,
    pub width: Option<f64>,
    pub edge_color: Option<String>,
    pub linewidths: Option<f64>,
    pub with_labels: Option<bool>,
    pub font_size: Option<f64>,
    pub cmap: Option<String>,
    pub alpha: Option<f64>,
    pub fig_size: Option<[f64; 2]>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        StyleConfig {
            node_size: 50.0,
            width: 0.2,
            edge_color: "black".to_string(),
            linewidths: 0.0,
            with_labels: false,
            font_size: 10.0,
            cmap: "tab20b".to_string(),
            alpha: 1.0,
            fig_size: None,
        }
    }
}

impl StyleConfig {
    /// Base style adjusted for a graph of `nodes` nodes.
    pub fn for_graph_size(nodes: usize) -> StyleConfig {
        let base = StyleConfig::default();
        match SizeTier::for_node_count(nodes) {
            SizeTier::Small => StyleConfig { alpha: 0.8, ..base },
            SizeTier::Medium => StyleConfig {
                node_size: 30.0,
                alpha: 0.4,
                ..base
            },
            SizeTier::Large => StyleConfig {
                node_size: 20.0,
                alpha: 0.2,
                ..base
            },
        }
    }

    /// Size-tiered defaults with an optional override file merged on top.
    ///
    /// A missing or invalid override file is logged and ignored.
    pub fn resolve(nodes: usize, override_path: Option<&Path>) -> StyleConfig {
        let mut style = StyleConfig::for_graph_size(nodes);
        if let Some(path) = override_path {
            match load_style_override(path) {
                Ok(custom) => {
                    info!(path = %path.display(), "applying style overrides");
                    style.apply(custom);
                }
                Err(err) => warn!("{}. Using default settings.", err),
            }
        }
        style
    }

    pub fn apply(&mut self, custom: StyleOverride) {
        let StyleOverride {
            node_size,
            width,
            edge_color,
            linewidths,
            with_labels,
            font_size,
            cmap,
            alpha,
            fig_size,
        } = custom;

        if let Some(v) = node_size {
            self.node_size = v;
        }
        if let Some(v) = width {
            self.width = v;
        }
        if let Some(v) = edge_color {
            self.edge_color = v;
        }
        if let Some(v) = linewidths {
            self.linewidths = v;
        }
        if let Some(v) = with_labels {
            self.with_labels = v;
        }
        if let Some(v) = font_size {
            self.font_size = v;
        }
        if let Some(v) = cmap {
            self.cmap = v;
        }
        if let Some(v) = alpha {
            self.alpha = v;
        }
        if fig_size.is_some() {
            self.fig_size = fig_size;
        }
    }

    /// Figure size in inches: the configured size, or one that grows with
    /// the graph (10in per 100 nodes, never below 10in).
    pub fn figure_size(&self, nodes: usize) -> [f64; 2] {
        if let Some(size) = self.fig_size {
            return size;
        }
        let side = BASE_FIGURE_INCHES * (nodes as f64 / 100.0).max(1.0);
        [side, side]
    }
}

/// Read a style override file. `.toml` files are parsed as TOML, anything
/// else as JSON.
pub fn load_style_override(path: &Path) -> Result<StyleOverride> {
    let invalid = |message: String| SheetGraphError::StyleConfig {
        path: path.to_path_buf(),
        message,
    };

    let meta = std::fs::metadata(path).map_err(|err| invalid(err.to_string()))?;
    if meta.len() > MAX_STYLE_FILE_BYTES {
        return Err(invalid(format!(
            "file too large ({} bytes, max {})",
            meta.len(),
            MAX_STYLE_FILE_BYTES
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|err| invalid(err.to_string()))?;
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        toml::from_str(&content).map_err(|err| invalid(err.to_string()))
    } else {
        serde_json::from_str(&content).map_err(|err| invalid(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct Cleanup(PathBuf);
    impl Drop for Cleanup {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    fn temp_style(tag: &str, ext: &str, contents: &str) -> (PathBuf, Cleanup) {
        let path = std::env::temp_dir().join(format!(
            "sheetgraph_style_{}_{}_{:?}.{}",
            tag,
            std::process::id(),
            std::thread::current().id(),
            ext
        ));
        std::fs::write(&path, contents).unwrap();
        (path.clone(), Cleanup(path))
    }

    #[test]
    fn test_size_tiers() {
        let small = StyleConfig::for_graph_size(199);
        assert_eq!((small.node_size, small.alpha), (50.0, 0.8));

        let medium = StyleConfig::for_graph_size(200);
        assert_eq!((medium.node_size, medium.alpha), (30.0, 0.4));

        let large = StyleConfig::for_graph_size(500);
        assert_eq!((large.node_size, large.alpha), (20.0, 0.2));
        assert_eq!(large.cmap, "tab20b");
        assert!(!large.with_labels);
    }

    #[test]
    fn test_figure_size_grows_with_graph() {
        let style = StyleConfig::default();
        assert_eq!(style.figure_size(10), [10.0, 10.0]);
        assert_eq!(style.figure_size(250), [25.0, 25.0]);

        let fixed = StyleConfig {
            fig_size: Some([4.0, 3.0]),
            ..StyleConfig::default()
        };
        assert_eq!(fixed.figure_size(1_000), [4.0, 3.0]);
    }

    #[test]
    fn test_json_override_merges_over_tier() {
        let (path, _cleanup) = temp_style(
            "json",
            "json",
            r#"{ "node_size": 5, "with_labels": true, "fig_size": [8, 6] }"#,
        );
        let style = StyleConfig::resolve(300, Some(&path));
        assert_eq!(style.node_size, 5.0);
        assert!(style.with_labels);
        assert_eq!(style.fig_size, Some([8.0, 6.0]));
        // Untouched keys keep the medium-tier value.
        assert_eq!(style.alpha, 0.4);
    }

    #[test]
    fn test_toml_override() {
        let (path, _cleanup) = temp_style("toml", "toml", "cmap = \"tab10\"\nalpha = 0.5\n");
        let custom = load_style_override(&path).unwrap();
        assert_eq!(custom.cmap.as_deref(), Some("tab10"));
        assert_eq!(custom.alpha, Some(0.5));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let (path, _cleanup) = temp_style("unknown", "json", r#"{ "colour": "red" }"#);
        let err = load_style_override(&path).unwrap_err();
        assert!(matches!(err, SheetGraphError::StyleConfig { .. }));
    }

    #[test]
    fn test_unreadable_override_names_the_file() {
        let (path, _cleanup) = temp_style("binary", "json", "");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let err = load_style_override(&path).unwrap_err();
        assert!(matches!(err, SheetGraphError::StyleConfig { .. }));
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn test_invalid_or_missing_override_falls_back_to_defaults() {
        let (path, _cleanup) = temp_style("broken", "json", "{ not json");
        assert_eq!(StyleConfig::resolve(10, Some(&path)), StyleConfig::for_graph_size(10));

        let missing = Path::new("no/such/style.json");
        assert_eq!(StyleConfig::resolve(10, Some(missing)), StyleConfig::for_graph_size(10));
    }
}
