//! XML configuration document loader
//!
//! Expected layout:
//!
//! ```xml
//! <config>
//!   <global><option>value</option></global>
//!   <card id="0">
//!     <cpu id="0">
//!       <option>value</option>
//!       <block-devs>
//!         <vcablk0><mode>ro</mode></vcablk0>
//!       </block-devs>
//!     </cpu>
//!   </card>
//! </config>
//! ```
//!
//! Elements without text are absent options. In the global section the text
//! `None` is absent as well.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use roxmltree::{Document, Node};

use super::{ConfigSnapshot, OptionSet};
use crate::error::{Error, Result};
use crate::topology::{CARD_SLOTS, NODE_SLOTS};

const GLOBAL_TAG: &str = "global";
const CARD_TAG: &str = "card";
const CPU_TAG: &str = "cpu";
const BLOCK_DEVS_TAG: &str = "block-devs";
const GLOBAL_NONE: &str = "None";

impl ConfigSnapshot {
    /// Parse a document from XML text
    pub fn from_xml_str(text: &str) -> Result<Self> {
        parse(text, Path::new("<input>"))
    }

    /// Load a document from an XML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => Error::DocumentNotFound {
                path: path.to_path_buf(),
            },
            _ => Error::Io(e),
        })?;
        let snapshot = parse(&text, path)?;
        tracing::debug!(path = %path.display(), globals = snapshot.global.len(), "loaded configuration document");
        Ok(snapshot)
    }
}

fn parse(text: &str, path: &Path) -> Result<ConfigSnapshot> {
    let doc = Document::parse(text).map_err(|e| Error::DocumentParse {
        path: PathBuf::from(path),
        message: e.to_string(),
    })?;
    let root = doc.root_element();
    let mut snapshot = ConfigSnapshot::new();

    if let Some(global) = child_elements(root).find(|n| n.has_tag_name(GLOBAL_TAG)) {
        for item in child_elements(global) {
            let value = item.text().filter(|t| *t != GLOBAL_NONE);
            snapshot
                .global
                .insert(item.tag_name().name(), value.map(str::to_string));
        }
    }

    for card in child_elements(root).filter(|n| n.has_tag_name(CARD_TAG)) {
        let card_id = slot_id(card, CARD_SLOTS)?;
        for cpu in child_elements(card).filter(|n| n.has_tag_name(CPU_TAG)) {
            let cpu_id = slot_id(cpu, NODE_SLOTS)?;
            let node = snapshot.node_mut(card_id, cpu_id);

            for item in child_elements(cpu) {
                if item.has_tag_name(BLOCK_DEVS_TAG) {
                    for device in child_elements(item) {
                        let options = node.device_mut(device.tag_name().name());
                        read_options(device, options);
                    }
                } else {
                    node.options
                        .insert(item.tag_name().name(), item.text().map(str::to_string));
                }
            }
        }
    }

    Ok(snapshot)
}

fn child_elements<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|n| n.is_element())
}

fn read_options(parent: Node<'_, '_>, options: &mut OptionSet) {
    for item in child_elements(parent) {
        options.insert(item.tag_name().name(), item.text().map(str::to_string));
    }
}

fn slot_id(node: Node<'_, '_>, slots: usize) -> Result<usize> {
    let tag = node.tag_name().name();
    let raw = node.attribute("id").ok_or_else(|| Error::MalformedDocument {
        message: format!("<{}> element without id", tag),
    })?;
    match raw.trim().parse::<usize>() {
        Ok(id) if id < slots => Ok(id),
        _ => Err(Error::MalformedDocument {
            message: format!("<{} id=\"{}\"> is outside 0..{}", tag, raw, slots),
        }),
    }
}
