use crate::constants::{SHEET_HEIGHT_MM, SHEET_WIDTH_MM};
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Font sizes in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    pub title: f32,
    pub author: f32,
    pub section_label: f32,
    pub lyrics: f32,
    /// Song list entries on the title page
    pub toc: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            title: 11.0,
            author: 9.0,
            section_label: 8.75,
            lyrics: 8.75,
            toc: 9.0,
        }
    }
}

/// A link printed as a QR code on the back cover
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrLink {
    pub url: String,
    pub caption: String,
}

/// A name on the back cover's thanks list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credit {
    pub name: String,
    pub role: String,
}

/// Booklet layout and content configuration
///
/// Sheet size is fixed (Letter landscape); everything else can be tuned
/// through a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookletOptions {
    // Margins
    pub side_margin_mm: f32,
    pub top_margin_mm: f32,
    pub bottom_margin_mm: f32,
    pub column_gap_mm: f32,

    // Text metrics
    pub line_height_mm: f32,
    pub label_width_mm: f32,
    pub font_sizes: FontSizes,

    // Pagination
    pub song_gap_mm: f32,
    pub max_toc_entries: usize,

    // Title page
    pub title: String,
    pub quote: String,

    // Back cover
    pub qr_size_mm: f32,
    pub mailing_list: QrLink,
    pub website: QrLink,
    pub credits: Vec<Credit>,
}

impl Default for BookletOptions {
    fn default() -> Self {
        Self {
            side_margin_mm: 14.0,
            top_margin_mm: 10.0,
            bottom_margin_mm: 14.0,
            column_gap_mm: 40.0,
            line_height_mm: 4.25,
            label_width_mm: 20.0,
            font_sizes: FontSizes::default(),
            song_gap_mm: 6.0,
            max_toc_entries: 25,
            title: "Sing For Joy".to_string(),
            quote: "\"...let them ever sing for joy.\" - Psalm 5:11".to_string(),
            qr_size_mm: 45.0,
            mailing_list: QrLink {
                url: "https://docs.google.com/forms/d/1TqZYus-cnbzcF9ICdVFqH9LwDEVTybSX9xBkZ6tV19c"
                    .to_string(),
                caption: "Join Mailing List".to_string(),
            },
            website: QrLink {
                url: "https://joshuapelican.github.io/sing-for-joy".to_string(),
                caption: "Digital Lyrics".to_string(),
            },
            credits: Vec::new(),
        }
    }
}

impl BookletOptions {
    /// Load options from JSON file
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| BookletError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| BookletError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub fn sheet_width_mm(&self) -> f32 {
        SHEET_WIDTH_MM
    }

    pub fn sheet_height_mm(&self) -> f32 {
        SHEET_HEIGHT_MM
    }

    /// Width of one logical page's text column
    pub fn column_width_mm(&self) -> f32 {
        (SHEET_WIDTH_MM - 2.0 * self.side_margin_mm - self.column_gap_mm) / 2.0
    }

    /// Left edge of the given column on a sheet side
    pub fn column_x(&self, side: ColumnSide) -> f32 {
        match side {
            ColumnSide::Left => self.side_margin_mm,
            ColumnSide::Right => self.side_margin_mm + self.column_width_mm() + self.column_gap_mm,
        }
    }

    /// Lowest baseline a song may start from before it is pushed to the next page
    pub fn content_bottom_mm(&self) -> f32 {
        SHEET_HEIGHT_MM - self.bottom_margin_mm
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.line_height_mm <= 0.0 {
            return Err(BookletError::Config(
                "Line height must be positive".to_string(),
            ));
        }

        let fonts = &self.font_sizes;
        let sizes = [
            fonts.title,
            fonts.author,
            fonts.section_label,
            fonts.lyrics,
            fonts.toc,
        ];
        if sizes.iter().any(|&size| size <= 0.0) {
            return Err(BookletError::Config(
                "Font sizes must be positive".to_string(),
            ));
        }

        if self.top_margin_mm < 0.0 || self.bottom_margin_mm < 0.0 || self.side_margin_mm < 0.0 {
            return Err(BookletError::Config(
                "Margins cannot be negative".to_string(),
            ));
        }

        if self.top_margin_mm >= self.content_bottom_mm() {
            return Err(BookletError::Config(format!(
                "Top margin {}mm and bottom margin {}mm leave no room on a {}mm sheet",
                self.top_margin_mm, self.bottom_margin_mm, SHEET_HEIGHT_MM
            )));
        }

        if self.column_width_mm() <= self.label_width_mm {
            return Err(BookletError::Config(format!(
                "Column width {:.1}mm must exceed label width {}mm",
                self.column_width_mm(),
                self.label_width_mm
            )));
        }

        if self.qr_size_mm <= 0.0 {
            return Err(BookletError::Config("QR size must be positive".to_string()));
        }

        Ok(())
    }
}

/// Which half of a physical sheet side a logical page occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSide {
    Left,
    Right,
}
