//! The exchanged form-description document.
//!
//! ```json
//! {
//!   "formType": "W2",
//!   "pageNumber": 1,
//!   "boundingBox": [[10, 10], [200, 90]],
//!   "fields": [
//!     {
//!       "section": "Personal Info",
//!       "sectionBoundingBox": [[10, 10], [200, 50]],
//!       "label": "Full Name",
//!       "boundingBox": [[15, 60], [190, 90]],
//!       "inputs": [
//!         { "name": "fullName", "type": "name", "lang": "en",
//!           "position": [[20, 65], [180, 85]], "value": null }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! The document is grouped by label: each field is one (section, label)
//! pair with that label's inputs. Section geometry is repeated on every
//! field of the section.

use serde::{Deserialize, Serialize};

use crate::model::{vocab::DEFAULT_INPUT_TYPE, BoundingBox, Point};

/// Box used for a section whose document field carries no
/// `sectionBoundingBox`.
pub fn default_section_bounding_box() -> BoundingBox {
    BoundingBox::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0))
}

fn default_input_type() -> String {
    DEFAULT_INPUT_TYPE.to_string()
}

/// A complete form layout for one page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDocument {
    /// Free-form identifier of the form, e.g. `"W2"`.
    pub form_type: String,

    /// 1-based page of the form this layout describes.
    pub page_number: u32,

    /// Union of every section, label and input rectangle.
    pub bounding_box: BoundingBox,

    pub fields: Vec<FormField>,
}

/// One (section, label) pair and the label's inputs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub section: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_bounding_box: Option<BoundingBox>,

    pub label: String,

    /// The label's rectangle.
    pub bounding_box: BoundingBox,

    #[serde(default)]
    pub inputs: Vec<FormInput>,
}

/// A data-entry region within a field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormInput {
    pub name: String,

    #[serde(rename = "type", default = "default_input_type")]
    pub input_type: String,

    #[serde(default)]
    pub lang: Option<String>,

    pub position: BoundingBox,

    #[serde(default)]
    pub value: Option<String>,
}

impl FormDocument {
    /// Number of inputs across all fields.
    pub fn input_count(&self) -> usize {
        self.fields.iter().map(|f| f.inputs.len()).sum()
    }

    /// Every rectangle in the document except the overall one.
    pub fn content_boxes(&self) -> impl Iterator<Item = &BoundingBox> + '_ {
        self.fields.iter().flat_map(|field| {
            field
                .section_bounding_box
                .iter()
                .chain(std::iter::once(&field.bounding_box))
                .chain(field.inputs.iter().map(|input| &input.position))
        })
    }
}
