//! Diff report types and text formatting.

use serde::Serialize;
use std::fmt;

/// Form document diff report.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DiffReport {
    /// Set when the form types differ.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_type: Option<Changed<String>>,
    /// Set when the page numbers differ.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<Changed<u32>>,
    /// Section-level counts, matched by name.
    pub sections: DiffCounts,
    /// Label-level counts, matched by (section, label text).
    pub labels: DiffCounts,
    /// Input-level counts, matched by (section, label text, input name).
    pub inputs: DiffCounts,
    /// Optional detail section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<DiffDetail>,
}

impl DiffReport {
    /// True if both documents describe the same sections, labels and inputs
    /// with the same geometry and attributes. Form type and page number are
    /// not compared.
    pub fn is_equivalent(&self) -> bool {
        [&self.sections, &self.labels, &self.inputs]
            .iter()
            .all(|c| c.only_in_a == 0 && c.only_in_b == 0 && c.modified == 0)
    }
}

/// A value that differs between the two documents.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Changed<T> {
    pub a: T,
    pub b: T,
}

/// Shared / only-in-A / only-in-B counts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DiffCounts {
    pub shared: usize,
    pub only_in_a: usize,
    pub only_in_b: usize,
    /// Shared items whose geometry or attributes differ.
    pub modified: usize,
}

/// Optional detail section for text/json output.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DiffDetail {
    pub only_in_a: Vec<String>,
    pub only_in_b: Vec<String>,
    pub modified: Vec<ModifiedItem>,
    pub max_items: usize,
}

impl DiffDetail {
    pub(crate) fn push_only_in_a(&mut self, item: String) {
        if self.only_in_a.len() < self.max_items {
            self.only_in_a.push(item);
        }
    }

    pub(crate) fn push_only_in_b(&mut self, item: String) {
        if self.only_in_b.len() < self.max_items {
            self.only_in_b.push(item);
        }
    }

    pub(crate) fn push_modified(&mut self, item: ModifiedItem) {
        if self.modified.len() < self.max_items {
            self.modified.push(item);
        }
    }
}

/// One modified section, label or input.
#[derive(Clone, Debug, Serialize)]
pub struct ModifiedItem {
    /// `section`, `section / label` or `section / label / input`.
    pub path: String,
    pub reason: String,
}

fn write_list(f: &mut fmt::Formatter<'_>, title: &str, items: &[String]) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{}:", title)?;
    if items.is_empty() {
        writeln!(f, "  - (none)")?;
    } else {
        for item in items {
            writeln!(f, "  - {item}")?;
        }
    }
    Ok(())
}

impl fmt::Display for DiffReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(change) = &self.form_type {
            writeln!(f, "Form type:   '{}' -> '{}'", change.a, change.b)?;
        }
        if let Some(change) = &self.page_number {
            writeln!(f, "Page number: {} -> {}", change.a, change.b)?;
        }
        for (name, counts) in [
            ("Sections:", &self.sections),
            ("Labels:", &self.labels),
            ("Inputs:", &self.inputs),
        ] {
            writeln!(
                f,
                "{:<12} {} shared, {} only in A, {} only in B, {} modified",
                name, counts.shared, counts.only_in_a, counts.only_in_b, counts.modified
            )?;
        }

        if let Some(detail) = &self.detail {
            write_list(f, "Only in A", &detail.only_in_a)?;
            write_list(f, "Only in B", &detail.only_in_b)?;

            writeln!(f)?;
            writeln!(f, "Modified (showing first {}):", detail.max_items)?;
            if detail.modified.is_empty() {
                writeln!(f, "  - (none)")?;
            } else {
                for item in &detail.modified {
                    writeln!(f, "  - {}: {}", item.path, item.reason)?;
                }
            }
        }

        writeln!(f)?;
        if self.is_equivalent() {
            writeln!(f, "Documents are equivalent")
        } else {
            writeln!(f, "Documents differ")
        }
    }
}
