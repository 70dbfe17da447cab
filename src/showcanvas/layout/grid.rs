use super::{
    FontWeight, ImagePlacement, ImageSource, ImageUpload, Placement, TextAlign, TextPlacement,
};
use crate::model::Show;

pub const COLUMNS: usize = 3;
pub const IMAGE_SIZE: u32 = 300;
pub const SPACING: u32 = 40;
const CAPTION_ALLOWANCE: u32 = 60;
const CAPTION_GAP: u32 = 10;
const CAPTION_SIZE: u32 = 20;

const ORIGIN_LEFT: u32 = 90;
const ORIGIN_TOP: u32 = 100;

/// Position of one performer in the grid, filled row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub row: usize,
    pub column: usize,
    pub left: u32,
    pub top: u32,
}

impl GridCell {
    pub fn caption_top(&self) -> u32 {
        self.top + IMAGE_SIZE + CAPTION_GAP
    }
}

pub fn grid_cell(index: usize) -> GridCell {
    let row = index / COLUMNS;
    let column = index % COLUMNS;
    GridCell {
        row,
        column,
        left: ORIGIN_LEFT + column as u32 * (IMAGE_SIZE + SPACING),
        top: ORIGIN_TOP + row as u32 * (IMAGE_SIZE + SPACING + CAPTION_ALLOWANCE),
    }
}

/// Lays out the lineup as a three-column grid: a headshot per performer that has one,
/// and a caption under every cell.
pub fn layout_performer_grid(show: &Show) -> Vec<Placement> {
    let mut placements = Vec::with_capacity(show.lineup.len() * 2);

    for (index, performer) in show.lineup.iter().enumerate() {
        let cell = grid_cell(index);

        if let Some(url) = performer
            .profile_image_url
            .as_deref()
            .filter(|url| !url.is_empty())
        {
            placements.push(Placement::Image(ImagePlacement {
                source: ImageSource::Pending(ImageUpload::jpeg(url)),
                top: cell.top,
                left: cell.left,
                width: IMAGE_SIZE,
                height: IMAGE_SIZE,
            }));
        }

        placements.push(Placement::Text(TextPlacement {
            content: performer.billing_name().to_string(),
            font_size: CAPTION_SIZE,
            font_weight: FontWeight::Bold,
            color: "#000000".to_string(),
            align: TextAlign::Center,
            top: cell.caption_top(),
            left: cell.left,
            width: IMAGE_SIZE,
        }));
    }

    placements
}
