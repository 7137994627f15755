//! Configuration document fixtures.
//!
//! [`ConfigXml`] builds documents in the device configuration layout and
//! [`DocumentSet`] writes the old/user/new trio into a temporary directory.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Builder for a configuration document.
///
/// # Example
///
/// ```rust
/// use vcacfg_test_utils::fixtures::ConfigXml;
///
/// let xml = ConfigXml::new()
///     .global("auto-boot", Some("1"))
///     .node(0, 0, "ip", Some("172.31.1.1"))
///     .device(0, 0, "vcablk0", "mode", Some("ro"))
///     .render();
/// assert!(xml.contains("<vcablk0>"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigXml {
    global: Vec<(String, Option<String>)>,
    nodes: Vec<NodeXml>,
}

#[derive(Debug, Clone)]
struct NodeXml {
    card: usize,
    node: usize,
    options: Vec<(String, Option<String>)>,
    devices: Vec<(String, Vec<(String, Option<String>)>)>,
}

impl ConfigXml {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a global option; `None` renders an empty element
    pub fn global(mut self, name: &str, value: Option<&str>) -> Self {
        self.global
            .push((name.to_string(), value.map(str::to_string)));
        self
    }

    /// Add an option to a compute node
    pub fn node(mut self, card: usize, node: usize, name: &str, value: Option<&str>) -> Self {
        self.node_entry(card, node)
            .options
            .push((name.to_string(), value.map(str::to_string)));
        self
    }

    /// Add an option to a block device of a compute node
    pub fn device(
        mut self,
        card: usize,
        node: usize,
        device: &str,
        name: &str,
        value: Option<&str>,
    ) -> Self {
        let entry = self.node_entry(card, node);
        let idx = match entry.devices.iter().position(|(d, _)| d == device) {
            Some(idx) => idx,
            None => {
                entry.devices.push((device.to_string(), Vec::new()));
                entry.devices.len() - 1
            }
        };
        entry.devices[idx]
            .1
            .push((name.to_string(), value.map(str::to_string)));
        self
    }

    fn node_entry(&mut self, card: usize, node: usize) -> &mut NodeXml {
        let idx = match self
            .nodes
            .iter()
            .position(|n| n.card == card && n.node == node)
        {
            Some(idx) => idx,
            None => {
                self.nodes.push(NodeXml {
                    card,
                    node,
                    options: Vec::new(),
                    devices: Vec::new(),
                });
                self.nodes.len() - 1
            }
        };
        &mut self.nodes[idx]
    }

    /// Render the document as XML text
    pub fn render(&self) -> String {
        let mut xml = String::from("<?xml version=\"1.0\"?>\n<config>\n  <global>\n");
        for (name, value) in &self.global {
            write_option(&mut xml, "    ", name, value.as_deref());
        }
        xml.push_str("  </global>\n");

        let mut cards: Vec<usize> = self.nodes.iter().map(|n| n.card).collect();
        cards.sort_unstable();
        cards.dedup();
        for card in cards {
            let _ = writeln!(xml, "  <card id=\"{}\">", card);
            for node in self.nodes.iter().filter(|n| n.card == card) {
                let _ = writeln!(xml, "    <cpu id=\"{}\">", node.node);
                for (name, value) in &node.options {
                    write_option(&mut xml, "      ", name, value.as_deref());
                }
                if !node.devices.is_empty() {
                    xml.push_str("      <block-devs>\n");
                    for (device, options) in &node.devices {
                        let _ = writeln!(xml, "        <{}>", device);
                        for (name, value) in options {
                            write_option(&mut xml, "          ", name, value.as_deref());
                        }
                        let _ = writeln!(xml, "        </{}>", device);
                    }
                    xml.push_str("      </block-devs>\n");
                }
                xml.push_str("    </cpu>\n");
            }
            xml.push_str("  </card>\n");
        }
        xml.push_str("</config>\n");
        xml
    }

    /// Write the document to `path`
    pub fn write_to(&self, path: &Path) {
        fs::write(path, self.render()).unwrap();
    }
}

fn write_option(xml: &mut String, indent: &str, name: &str, value: Option<&str>) {
    match value {
        Some(text) => {
            let _ = writeln!(xml, "{}<{}>{}</{}>", indent, name, escape(text), name);
        }
        None => {
            let _ = writeln!(xml, "{}<{}/>", indent, name);
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Old default, user and new default documents written to a temp directory
pub struct DocumentSet {
    temp_dir: TempDir,
}

impl DocumentSet {
    /// Write the three documents as `old.xml`, `user.xml` and `new.xml`
    pub fn write(old: &ConfigXml, user: &ConfigXml, new: &ConfigXml) -> Self {
        let temp_dir = TempDir::new().unwrap();
        old.write_to(&temp_dir.path().join("old.xml"));
        user.write_to(&temp_dir.path().join("user.xml"));
        new.write_to(&temp_dir.path().join("new.xml"));
        Self { temp_dir }
    }

    /// Directory holding the documents
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn old(&self) -> PathBuf {
        self.dir().join("old.xml")
    }

    pub fn user(&self) -> PathBuf {
        self.dir().join("user.xml")
    }

    pub fn new_default(&self) -> PathBuf {
        self.dir().join("new.xml")
    }
}

/// A realistic trio: one edited option, one shipped default change, one
/// conflict, one dropped option and a block device added by the user.
pub fn upgrade_scenario() -> (ConfigXml, ConfigXml, ConfigXml) {
    let old = ConfigXml::new()
        .global("auto-boot", Some("1"))
        .global("link-up-timeout-ms", Some("2000"))
        .node(0, 0, "ip", Some("172.31.1.1"))
        .node(0, 0, "os-image", Some("vca-old.img"))
        .node(0, 0, "legacy-flag", Some("0"));
    let user = ConfigXml::new()
        .global("auto-boot", Some("0"))
        .global("link-up-timeout-ms", Some("2000"))
        .node(0, 0, "ip", Some("172.31.1.1"))
        .node(0, 0, "os-image", Some("custom.img"))
        .node(0, 0, "legacy-flag", Some("0"))
        .device(0, 0, "vcablk0", "mode", Some("rw"))
        .device(0, 0, "vcablk0", "path", Some("/srv/disk.img"));
    let new = ConfigXml::new()
        .global("auto-boot", Some("1"))
        .global("link-up-timeout-ms", Some("3000"))
        .node(0, 0, "ip", Some("172.31.1.1"))
        .node(0, 0, "os-image", Some("vca-new.img"));
    (old, user, new)
}
