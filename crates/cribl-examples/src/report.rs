//! Console report formatting.
//!
//! The formatter is a structural dump: entities are printed in the order they
//! were received, and so are their fields.

use cribl_core::types::display_value;
use cribl_core::Entity;
use std::io::{self, Write};

/// Header shown when an entity has no usable identifier.
pub const UNKNOWN_ID: &str = "Unknown";

/// Wording and layout for one kind of listed entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportStyle {
    /// Header label, e.g. `Worker Group`.
    pub heading: &'static str,
    /// Field holding the identifier.
    pub id_field: &'static str,
    /// Extra underline length on top of the identifier.
    pub underline_padding: usize,
    /// Noun used in the count line.
    pub plural: &'static str,
    /// Line printed for an empty result.
    pub empty_message: &'static str,
}

impl ReportStyle {
    /// Worker groups keyed by `id`.
    pub const WORKER_GROUPS: Self = Self {
        heading: "Worker Group",
        id_field: "id",
        underline_padding: 16,
        plural: "worker group(s)",
        empty_message: "No worker groups found",
    };

    /// Workspaces keyed by `workspaceId`.
    pub const WORKSPACES: Self = Self {
        heading: "Workspace",
        id_field: "workspaceId",
        underline_padding: 12,
        plural: "workspace(s)",
        empty_message: "No workspaces found",
    };
}

/// Write a title followed by a rule of `width` dashes.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_title<W: Write>(out: &mut W, title: &str, width: usize) -> io::Result<()> {
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "-".repeat(width))
}

/// Write the count line and one block per entity, or the empty message.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_report<W: Write>(out: &mut W, style: &ReportStyle, items: &[Entity]) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "{}", style.empty_message);
    }

    writeln!(out, "\nFound {} {}:", items.len(), style.plural)?;
    writeln!(out)?;

    for entity in items {
        let id = entity
            .display_field(style.id_field)
            .unwrap_or_else(|| UNKNOWN_ID.to_string());

        writeln!(out, "{}: {id}", style.heading)?;
        writeln!(
            out,
            "{}",
            "-".repeat(id.chars().count() + style.underline_padding)
        )?;

        for (key, value) in entity.fields() {
            writeln!(out, "   {key}: {}", display_value(value))?;
        }
        writeln!(out)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(style: &ReportStyle, items: &[Entity]) -> String {
        let mut out = Vec::new();
        write_report(&mut out, style, items).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn entity(value: serde_json::Value) -> Entity {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn title_with_rule() {
        let mut out = Vec::new();
        write_title(&mut out, "Listing Cribl Workspaces", 40).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, format!("Listing Cribl Workspaces\n{}\n", "-".repeat(40)));
    }

    #[test]
    fn worker_group_blocks() {
        let items = vec![
            entity(json!({"id": "g1", "onPrem": true, "workerCount": 3})),
            entity(json!({"id": "g2", "tags": ["a", "b"], "description": null})),
        ];
        let text = render(&ReportStyle::WORKER_GROUPS, &items);

        let expected = "\nFound 2 worker group(s):\n\n\
            Worker Group: g1\n------------------\n   id: g1\n   onPrem: true\n   workerCount: 3\n\n\
            Worker Group: g2\n------------------\n   id: g2\n   tags: [\"a\",\"b\"]\n   description: null\n\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn one_block_per_entity() {
        let items: Vec<Entity> = (0..5)
            .map(|n| entity(json!({ "id": format!("group-{n}") })))
            .collect();
        let text = render(&ReportStyle::WORKER_GROUPS, &items);

        assert!(text.contains("Found 5 worker group(s):"));
        assert_eq!(text.matches("Worker Group: ").count(), 5);
    }

    #[test]
    fn empty_result_prints_message_only() {
        let text = render(&ReportStyle::WORKSPACES, &[]);
        assert_eq!(text, "No workspaces found\n");

        let text = render(&ReportStyle::WORKER_GROUPS, &[]);
        assert_eq!(text, "No worker groups found\n");
    }

    #[test]
    fn missing_identifier_falls_back_to_unknown() {
        let items = vec![
            entity(json!({"name": "no id here"})),
            entity(json!({"id": null})),
            entity(json!({"id": ""})),
        ];
        let text = render(&ReportStyle::WORKER_GROUPS, &items);

        assert_eq!(text.matches("Worker Group: Unknown\n").count(), 3);
        assert!(text.contains(&format!("Unknown\n{}\n", "-".repeat(23))));
    }

    #[test]
    fn workspace_uses_workspace_id() {
        let items = vec![entity(json!({"workspaceId": "main", "alias": "Production"}))];
        let text = render(&ReportStyle::WORKSPACES, &items);

        assert!(text.contains("Found 1 workspace(s):"));
        assert!(text.contains(&format!("Workspace: main\n{}\n", "-".repeat(16))));
        assert!(text.contains("   alias: Production\n"));
    }

    #[test]
    fn fields_keep_received_order() {
        let raw = r#"{"zeta": 1, "id": "g1", "alpha": {"nested": true}}"#;
        let items = vec![serde_json::from_str::<Entity>(raw).unwrap()];
        let text = render(&ReportStyle::WORKER_GROUPS, &items);

        let zeta = text.find("   zeta: 1").unwrap();
        let id = text.find("   id: g1").unwrap();
        let alpha = text.find("   alpha: {\"nested\":true}").unwrap();
        assert!(zeta < id && id < alpha);
    }
}
