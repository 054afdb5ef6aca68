use std::{collections::HashSet, fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    foundation::error::{SlideError, SlideResult},
    model::slide::Slide,
};

/// One batch export: every slide of a slideshow, rendered and uploaded in position order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    /// Slides in any order; `position` decides export order.
    pub slides: Vec<Slide>,
    /// Owner of the slideshow, first segment of every upload key.
    pub owner_id: String,
    /// Slideshow identifier, second segment of every upload key.
    pub slideshow_id: String,
}

impl ExportRequest {
    /// Build a request.
    pub fn new(
        owner_id: impl Into<String>,
        slideshow_id: impl Into<String>,
        slides: Vec<Slide>,
    ) -> Self {
        Self {
            slides,
            owner_id: owner_id.into(),
            slideshow_id: slideshow_id.into(),
        }
    }

    /// Parse from JSON.
    pub fn from_reader<R: std::io::Read>(r: R) -> SlideResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| SlideError::validation(format!("parse export request JSON: {e}")))
    }

    /// Parse from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> SlideResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SlideError::validation(format!(
                "open export request '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject requests that must not start rendering.
    pub fn validate(&self) -> SlideResult<()> {
        if self.slides.is_empty() {
            return Err(SlideError::validation("export request has no slides"));
        }
        check_key_segment("ownerId", &self.owner_id)?;
        check_key_segment("slideshowId", &self.slideshow_id)?;

        let mut ids = HashSet::new();
        let mut positions = HashSet::new();
        for slide in &self.slides {
            slide.validate()?;
            check_key_segment("slide id", &slide.id)?;
            if !ids.insert(slide.id.as_str()) {
                return Err(SlideError::validation(format!(
                    "duplicate slide id '{}'",
                    slide.id
                )));
            }
            if !positions.insert(slide.position) {
                return Err(SlideError::validation(format!(
                    "duplicate slide position {} (slide '{}')",
                    slide.position, slide.id
                )));
            }
        }
        Ok(())
    }

    /// Slides sorted by `position`.
    pub fn ordered_slides(&self) -> Vec<&Slide> {
        let mut slides = self.slides.iter().collect::<Vec<_>>();
        slides.sort_by_key(|s| s.position);
        slides
    }
}

/// Upload key of a rendered slide: `rendered/{owner}/{slideshow}/{slide}-{timestamp}`.
pub fn upload_key(owner_id: &str, slideshow_id: &str, slide_id: &str, timestamp: u64) -> String {
    format!("rendered/{owner_id}/{slideshow_id}/{slide_id}-{timestamp}")
}

/// Identifiers end up as object-key segments.
fn check_key_segment(what: &str, value: &str) -> SlideResult<()> {
    if value.is_empty() {
        return Err(SlideError::validation(format!("{what} must be non-empty")));
    }
    if value == "." || value == ".." {
        return Err(SlideError::validation(format!(
            "{what} '{value}' is not a valid key segment"
        )));
    }
    if let Some(c) = value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(SlideError::validation(format!(
            "{what} '{value}' contains '{c}'; only ASCII letters, digits, '-', '_' and '.' are allowed"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/export/request.rs"]
mod tests;
