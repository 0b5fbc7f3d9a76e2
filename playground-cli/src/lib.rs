//! # Playground CLI
//!
//! Headless host for the playground core. Stands in for the browser: reads
//! a script of drop, drag, select and form events, feeds them to a
//! [`Playground`], and prints every element and form render.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p playground-cli -- --script events.json
//! ```
//!
//! ## Script format
//!
//! A JSON array of events. Elements are referred to by the order they were
//! dropped in, starting at 0:
//!
//! ```json
//! [
//!   { "event": "drop", "type": "text", "x": 50, "y": 80 },
//!   { "event": "fieldChange", "property": "bold", "value": true },
//!   { "event": "dragMove", "element": 0, "x": 120, "y": 90 }
//! ]
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use playground_core::{
    ElementId, FormDescription, HostEvent, Playground, PlaygroundConfig, RawValue, RenderHost,
    Size, VisualContent, VisualNode,
};
use serde::Deserialize;

/// Command-line arguments for the playground CLI.
#[derive(Debug, Clone, Parser)]
#[command(name = "playground")]
#[command(about = "Replay canvas editor events without a browser")]
#[command(version)]
pub struct CliArgs {
    /// Path to a JSON array of script events
    #[arg(long, short)]
    pub script: PathBuf,

    /// Canvas width in pixels
    #[arg(long, env = "PLAYGROUND_VIEWPORT_WIDTH", default_value = "800")]
    pub viewport_width: f64,

    /// Canvas height in pixels
    #[arg(long, env = "PLAYGROUND_VIEWPORT_HEIGHT", default_value = "600")]
    pub viewport_height: f64,

    /// Size of newly dropped elements in pixels
    #[arg(long, default_value = "100")]
    pub element_size: f64,

    /// Let dragged elements leave the viewport
    #[arg(long, env = "PLAYGROUND_NO_CONTAIN")]
    pub no_contain: bool,

    /// Output format for renders
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl TryFrom<&CliArgs> for PlaygroundConfig {
    type Error = anyhow::Error;

    fn try_from(args: &CliArgs) -> anyhow::Result<Self> {
        let config = Self {
            viewport_width: args.viewport_width,
            viewport_height: args.viewport_height,
            element_size: Size::new(args.element_size, args.element_size),
            contain_drag: !args.no_contain,
        };
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

/// How renders are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One human-readable line per render.
    Text,
    /// One JSON object per render.
    Json,
}

/// One scripted host event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ScriptEvent {
    /// Drop a template.
    Drop {
        /// Template type name.
        #[serde(rename = "type")]
        element_type: String,
        /// Drop X.
        x: f64,
        /// Drop Y.
        y: f64,
    },
    /// Drag an element.
    DragMove {
        /// Drop-order index of the element.
        element: usize,
        /// New X.
        x: f64,
        /// New Y.
        y: f64,
    },
    /// Click an element.
    Select {
        /// Drop-order index of the element.
        element: usize,
    },
    /// Change a form field of the selected element.
    FieldChange {
        /// Property name.
        property: String,
        /// Raw control value.
        value: RawValue,
    },
    /// Delete an element.
    Remove {
        /// Drop-order index of the element.
        element: usize,
    },
}

impl ScriptEvent {
    /// Turn drop-order indices into element ids.
    ///
    /// # Errors
    ///
    /// Returns an error if the script refers to an element that was never
    /// dropped.
    pub fn resolve(self, dropped: &[ElementId]) -> anyhow::Result<HostEvent> {
        let lookup = |index: usize| -> anyhow::Result<ElementId> {
            match dropped.get(index) {
                Some(id) => Ok(*id),
                None => bail!(
                    "script refers to element {index} but only {} were dropped",
                    dropped.len()
                ),
            }
        };
        Ok(match self {
            Self::Drop { element_type, x, y } => HostEvent::Drop { element_type, x, y },
            Self::DragMove { element, x, y } => HostEvent::DragMove {
                id: lookup(element)?,
                x,
                y,
            },
            Self::Select { element } => HostEvent::Select {
                id: lookup(element)?,
            },
            Self::FieldChange { property, value } => HostEvent::FieldChange { property, value },
            Self::Remove { element } => HostEvent::Remove {
                id: lookup(element)?,
            },
        })
    }
}

/// Read a script file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid script.
pub fn load_script(path: &Path) -> anyhow::Result<Vec<ScriptEvent>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid script {}", path.display()))
}

/// Render host that prints to a writer.
#[derive(Debug)]
pub struct ConsoleHost<W> {
    out: W,
    format: OutputFormat,
    write_error: Option<std::io::Error>,
}

impl<W: Write> ConsoleHost<W> {
    /// Create a host printing in `format`.
    #[must_use]
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            write_error: None,
        }
    }

    /// Consume the host, returning the writer.
    ///
    /// # Errors
    ///
    /// Returns the first write error hit while rendering.
    pub fn finish(self) -> std::io::Result<W> {
        match self.write_error {
            Some(err) => Err(err),
            None => Ok(self.out),
        }
    }

    fn emit(
        &mut self,
        kind: &str,
        text: impl FnOnce() -> String,
        json: impl FnOnce() -> serde_json::Value,
    ) {
        if self.write_error.is_some() {
            return;
        }
        let result = match self.format {
            OutputFormat::Text => writeln!(self.out, "{kind:<7} {}", text()),
            OutputFormat::Json => {
                writeln!(self.out, "{}", serde_json::json!({ "render": kind, "data": json() }))
            }
        };
        if let Err(err) = result {
            self.write_error = Some(err);
        }
    }
}

impl<W: Write> RenderHost for ConsoleHost<W> {
    fn render_element(&mut self, node: &VisualNode) {
        self.emit(
            "element",
            || describe_node(node),
            || serde_json::to_value(node).unwrap_or_default(),
        );
    }

    fn render_form(&mut self, form: &FormDescription) {
        self.emit(
            "form",
            || describe_form(form),
            || serde_json::to_value(form).unwrap_or_default(),
        );
    }

    fn remove_element(&mut self, id: ElementId) {
        self.emit("remove", || id.to_string(), || serde_json::json!({ "id": id }));
    }

    fn clear_form(&mut self) {
        self.emit("form", || "(none)".to_string(), || serde_json::Value::Null);
    }
}

fn describe_node(node: &VisualNode) -> String {
    let marker = if node.selected { " *" } else { "" };
    let content = match &node.content {
        VisualContent::Text {
            font_family,
            font_size,
            font_weight,
            font_style,
            text_decoration,
            ..
        } => format!("{font_family} {font_size}px {font_weight} {font_style} {text_decoration}"),
        VisualContent::Image { src, .. } => src.clone(),
        VisualContent::Shape { .. } => node.content.svg_markup().unwrap_or_default(),
    };
    format!(
        "{} {} @ ({}, {}) {}x{}{marker} {content}",
        node.element_type, node.id, node.left, node.top, node.width, node.height
    )
}

fn describe_form(form: &FormDescription) -> String {
    let fields: Vec<String> = form
        .fields
        .iter()
        .map(|f| format!("{}={}", f.property, f.current_value))
        .collect();
    format!("{} {} [{}]", form.element_type, form.element_id, fields.join(", "))
}

/// Counts from one replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Events processed.
    pub events: usize,
    /// Events the playground accepted.
    pub applied: usize,
    /// Events the playground rejected.
    pub rejected: usize,
}

/// Replay `events` through a fresh playground.
///
/// Rejected edits are logged and counted; they do not stop the replay.
///
/// # Errors
///
/// Returns an error if an event refers to an element that was never
/// dropped.
pub fn replay<H: RenderHost>(
    events: Vec<ScriptEvent>,
    config: PlaygroundConfig,
    host: H,
) -> anyhow::Result<(ReplaySummary, H)> {
    let mut playground = Playground::new(config, host);
    let mut dropped = Vec::new();
    let mut summary = ReplaySummary::default();

    for (index, event) in events.into_iter().enumerate() {
        let event = event
            .resolve(&dropped)
            .with_context(|| format!("Event {index}"))?;
        summary.events += 1;

        let result = match event {
            HostEvent::Drop { element_type, x, y } => playground
                .on_drop(&element_type, x, y)
                .map(|id| dropped.push(id)),
            other => playground.dispatch(other),
        };
        match result {
            Ok(()) => summary.applied += 1,
            Err(err) => {
                summary.rejected += 1;
                tracing::warn!(event = index, "Event rejected: {err}");
            }
        }
    }

    Ok((summary, playground.into_host()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(json: &str) -> Vec<ScriptEvent> {
        serde_json::from_str(json).expect("valid script")
    }

    fn run_text(events: Vec<ScriptEvent>) -> (ReplaySummary, String) {
        let host = ConsoleHost::new(Vec::new(), OutputFormat::Text);
        let (summary, host) =
            replay(events, PlaygroundConfig::default(), host).expect("replay runs");
        let out = host.finish().expect("no write errors");
        (summary, String::from_utf8(out).expect("utf8"))
    }

    #[test]
    fn test_replay_drop_and_edit() {
        let events = script(
            r#"[
                {"event":"drop","type":"text","x":50,"y":80},
                {"event":"fieldChange","property":"bold","value":true},
                {"event":"fieldChange","property":"fontSize","value":"999"}
            ]"#,
        );
        let (summary, out) = run_text(events);

        assert_eq!(
            summary,
            ReplaySummary {
                events: 3,
                applied: 3,
                rejected: 0
            }
        );
        assert!(out.contains("Arial 16px bold normal none"));
        assert!(out.contains("fontSize=72"));
    }

    #[test]
    fn test_rejected_events_are_counted() {
        let events = script(
            r#"[
                {"event":"fieldChange","property":"bold","value":true},
                {"event":"drop","type":"video","x":0,"y":0},
                {"event":"drop","type":"shape","x":0,"y":0},
                {"event":"fieldChange","property":"fontSize","value":"12"},
                {"event":"fieldChange","property":"strokeWidth","value":"abc"}
            ]"#,
        );
        let (summary, _) = run_text(events);
        assert_eq!(summary.applied, 1);
        assert_eq!(summary.rejected, 4);
    }

    #[test]
    fn test_select_and_drag_by_index() {
        let events = script(
            r#"[
                {"event":"drop","type":"image","x":0,"y":0},
                {"event":"drop","type":"shape","x":300,"y":0},
                {"event":"select","element":0},
                {"event":"dragMove","element":1,"x":900,"y":10},
                {"event":"remove","element":0}
            ]"#,
        );
        let (summary, out) = run_text(events);
        assert_eq!(summary.rejected, 0);
        assert!(out.contains("@ (700, 10)"));
        assert!(out.lines().any(|l| l.starts_with("remove")));
        assert!(out.lines().last().is_some_and(|l| l.contains("(none)")));
    }

    #[test]
    fn test_unknown_index_aborts() {
        let events = script(r#"[{"event":"select","element":3}]"#);
        let host = ConsoleHost::new(Vec::new(), OutputFormat::Text);
        let err = replay(events, PlaygroundConfig::default(), host).unwrap_err();
        assert!(format!("{err:#}").contains("element 3"));
    }

    #[test]
    fn test_json_output_lines_parse() {
        let events = script(r#"[{"event":"drop","type":"shape","x":1,"y":2}]"#);
        let host = ConsoleHost::new(Vec::new(), OutputFormat::Json);
        let (_, host) = replay(events, PlaygroundConfig::default(), host).expect("replay");
        let out = String::from_utf8(host.finish().expect("write")).expect("utf8");

        let renders: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).expect("json line"))
            .collect();
        assert!(renders.iter().any(|r| r["render"] == "form"));
        assert!(renders
            .iter()
            .any(|r| r["render"] == "element" && r["data"]["content"]["type"] == "shape"));
    }

    #[test]
    fn test_load_script_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("events.json");
        std::fs::write(&path, r#"[{"event":"drop","type":"text","x":0,"y":0}]"#)
            .expect("write script");

        let events = load_script(&path).expect("load");
        assert_eq!(events.len(), 1);

        let missing = load_script(&dir.path().join("missing.json")).unwrap_err();
        assert!(missing.to_string().contains("Failed to read script"));
    }

    #[test]
    fn test_cli_args_map_to_config() {
        let args = CliArgs::parse_from([
            "playground",
            "--script",
            "events.json",
            "--viewport-width",
            "1024",
            "--no-contain",
        ]);
        let config = PlaygroundConfig::try_from(&args).expect("valid config");
        assert!(!config.contain_drag);
        assert_eq!(config.element_size, Size::new(100.0, 100.0));
        assert!((config.viewport_width - 1024.0).abs() < f64::EPSILON);
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn test_bad_element_size_is_rejected() {
        let args = CliArgs::parse_from([
            "playground",
            "--script",
            "events.json",
            "--element-size=-50",
        ]);
        let err = PlaygroundConfig::try_from(&args).unwrap_err();
        assert!(format!("{err:#}").contains("element_size"));
    }
}
