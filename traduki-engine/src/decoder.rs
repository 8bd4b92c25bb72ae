//! Decoder interface and construction recipe
//!
//! The statistical decoding algorithm is an external service; this
//! module owns only what the engine needs from it: the template merge
//! that produces the decoder's materialized configuration, and the
//! closeable handle the registry stores.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::resource::Resource;

/// Statistical decoding service.
///
/// Translation entry points are defined by the serving layer; the
/// engine owns only the lifecycle.
pub trait Decoder: Resource {}

/// The decoder configuration template (`models/moses.ini`).
///
/// Parsed just enough to merge per-engine overrides: the file is a
/// sequence of `[section]` headers with otherwise opaque payload
/// lines. Only the `[weight]` and `[threads]` sections are rewritten.
#[derive(Debug, Clone)]
pub struct DecoderTemplate {
    sections: Vec<Section>,
}

#[derive(Debug, Clone)]
struct Section {
    /// Empty for the preamble before the first header.
    name: String,
    lines: Vec<String>,
}

impl DecoderTemplate {
    /// Load a template file.
    pub fn load(path: &Path) -> io::Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(Self::parse(&raw))
    }

    fn parse(raw: &str) -> Self {
        let mut sections = vec![Section {
            name: String::new(),
            lines: Vec::new(),
        }];

        for line in raw.lines() {
            let trimmed = line.trim();
            if let Some(name) = trimmed
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
            {
                sections.push(Section {
                    name: name.to_string(),
                    lines: Vec::new(),
                });
            } else if let Some(section) = sections.last_mut() {
                section.lines.push(line.to_string());
            }
        }

        DecoderTemplate { sections }
    }

    /// Override feature weights in the `[weight]` section. Features not
    /// named in `weights` keep their template values.
    pub fn set_weights(&mut self, weights: &BTreeMap<String, Vec<f32>>) {
        let Some(section) = self.section_mut("weight") else {
            return;
        };

        for line in &mut section.lines {
            let Some((feature, _)) = line.split_once('=') else {
                continue;
            };
            if let Some(values) = weights.get(feature.trim()) {
                *line = render_weight(feature.trim(), values);
            }
        }
    }

    /// Set the decoder thread count, replacing any `[threads]` section
    /// or appending one when the template has none.
    pub fn set_threads(&mut self, threads: usize) {
        match self.section_mut("threads") {
            Some(section) => section.lines = vec![threads.to_string()],
            None => self.sections.push(Section {
                name: "threads".to_string(),
                lines: vec![threads.to_string()],
            }),
        }
    }

    /// Render the merged configuration.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            if !section.name.is_empty() {
                out.push('[');
                out.push_str(&section.name);
                out.push_str("]\n");
            }
            for line in &section.lines {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }

    fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.name == name)
    }
}

fn render_weight(feature: &str, values: &[f32]) -> String {
    let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("{feature}= {}", rendered.join(" "))
}

/// Handle to the external decoding service, driven by a materialized
/// configuration file in the engine's runtime scratch space.
#[derive(Debug)]
pub struct StatisticalDecoder {
    config_path: PathBuf,
}

impl StatisticalDecoder {
    /// Create a handle over a materialized configuration file.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        StatisticalDecoder {
            config_path: config_path.into(),
        }
    }

    /// Path of the merged configuration driving this decoder.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

impl Resource for StatisticalDecoder {
    fn close(&self) -> io::Result<()> {
        Ok(())
    }
}

impl Decoder for StatisticalDecoder {}
