use super::{
    CANVAS_WIDTH, FontWeight, ImagePlacement, ImageSource, ImageUpload, Placement, TextAlign,
    TextPlacement,
};
use crate::model::Show;

const TITLE_TOP: u32 = 100;
const TITLE_SIZE: u32 = 72;
const TITLE_COLOR: &str = "#FF00FF";

const SUBTITLE_TOP: u32 = 200;
const SUBTITLE_SIZE: u32 = 28;
const SUBTITLE_SEPARATOR: &str = " • ";

const COVER_TOP: u32 = 300;
const COVER_SIZE: u32 = 500;

const FEATURING_TOP: u32 = 850;
const FEATURING_SIZE: u32 = 32;
const GOLD: &str = "#FFD700";

const BILLING_TOP: u32 = 920;
const BILLING_ROW_HEIGHT: u32 = 40;
const BILLING_SIZE: u32 = 24;

const BLACK: &str = "#000000";

fn full_width_text(
    content: String,
    font_size: u32,
    font_weight: FontWeight,
    color: &str,
    top: u32,
) -> Placement {
    Placement::Text(TextPlacement {
        content,
        font_size,
        font_weight,
        color: color.to_string(),
        align: TextAlign::Center,
        top,
        left: 0,
        width: CANVAS_WIDTH,
    })
}

/// Lays out a show poster: title, "date • venue", optional cover image, a FEATURING
/// header and one row per performer in lineup order.
///
/// Rows past the bottom of the canvas are emitted anyway; there is no wrapping.
pub fn layout_show_poster(show: &Show) -> Vec<Placement> {
    let mut placements = Vec::with_capacity(4 + show.lineup.len());

    placements.push(full_width_text(
        show.title.to_uppercase(),
        TITLE_SIZE,
        FontWeight::Bold,
        TITLE_COLOR,
        TITLE_TOP,
    ));

    let subtitle = format!(
        "{}{}{}",
        show.show_date.poster_label(),
        SUBTITLE_SEPARATOR,
        show.venue_name
    );
    placements.push(full_width_text(
        subtitle,
        SUBTITLE_SIZE,
        FontWeight::Normal,
        BLACK,
        SUBTITLE_TOP,
    ));

    if let Some(url) = show.cover_image() {
        placements.push(Placement::Image(ImagePlacement {
            source: ImageSource::Pending(ImageUpload::jpeg(url)),
            top: COVER_TOP,
            left: (CANVAS_WIDTH - COVER_SIZE) / 2,
            width: COVER_SIZE,
            height: COVER_SIZE,
        }));
    }

    placements.push(full_width_text(
        "FEATURING".to_string(),
        FEATURING_SIZE,
        FontWeight::Bold,
        GOLD,
        FEATURING_TOP,
    ));

    let mut top = BILLING_TOP;
    for performer in &show.lineup {
        placements.push(full_width_text(
            performer.billing_name().to_string(),
            BILLING_SIZE,
            FontWeight::Medium,
            BLACK,
            top,
        ));
        top += BILLING_ROW_HEIGHT;
    }

    placements
}
