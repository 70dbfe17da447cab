use super::CmdMessage;
use crate::canvas::CanvasSink;
use crate::error::{Result, ShowCanvasError};
use crate::layout::{ImageSource, LayoutKind, Placement};
use crate::model::Show;
use tracing::{debug, info, warn};

/// What happened while submitting one layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertReport {
    pub placed: usize,
    /// Images left out because their upload failed.
    pub skipped_images: usize,
    pub messages: Vec<CmdMessage>,
}

impl InsertReport {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }
}

/// Submit placements to the sink one by one, in order.
///
/// A pending image is uploaded right before it is placed. A failed upload drops that
/// image and moves on. A failed placement stops the run and is returned; whatever was
/// placed before it stays on the canvas. If images were skipped earlier in the run,
/// the error is wrapped in `InsertAborted` so their URLs are not lost.
pub fn submit<K: CanvasSink>(sink: &mut K, placements: Vec<Placement>) -> Result<InsertReport> {
    let mut report = InsertReport::default();
    let mut skipped = Vec::new();

    for placement in placements {
        let placement = match placement {
            Placement::Image(image) => match &image.source {
                ImageSource::Pending(upload) => match sink.upload(upload) {
                    Ok(asset) => Placement::Image(image.resolved(asset)),
                    Err(err) => {
                        warn!(url = %upload.url, error = %err, "image upload failed, skipping");
                        report.skipped_images += 1;
                        skipped.push(upload.url.clone());
                        report.add_message(CmdMessage::warning(format!(
                            "Skipped image {}: {}",
                            upload.url, err
                        )));
                        continue;
                    }
                },
                ImageSource::Resolved { .. } => Placement::Image(image),
            },
            text => text,
        };

        if let Err(err) = sink.place(&placement) {
            warn!(placed = report.placed, error = %err, "placement failed, stopping");
            if skipped.is_empty() {
                return Err(err);
            }
            return Err(ShowCanvasError::InsertAborted {
                cause: Box::new(err),
                skipped,
            });
        }
        report.placed += 1;
        debug!(position = report.placed, "placed element");
    }

    Ok(report)
}

/// Lay out `show` with `kind` and submit it to `sink`.
pub fn run<K: CanvasSink>(sink: &mut K, show: &Show, kind: LayoutKind) -> Result<InsertReport> {
    let placements = kind.layout(show);
    debug!(show = %show.id, layout = %kind, count = placements.len(), "laid out show");

    let mut report = submit(sink, placements)?;
    info!(show = %show.id, layout = %kind, placed = report.placed, "inserted show");

    report.add_message(CmdMessage::success(success_message(show, kind)));
    Ok(report)
}

pub fn success_message(show: &Show, kind: LayoutKind) -> String {
    match kind {
        LayoutKind::Poster => format!("✨ {} inserted into your design!", show.title),
        LayoutKind::Grid => format!("✨ {} performers inserted!", show.lineup.len()),
    }
}

pub fn failure_message(kind: LayoutKind, cause: &str) -> String {
    match kind {
        LayoutKind::Poster => format!("Failed to insert show: {}", cause),
        LayoutKind::Grid => format!("Failed to insert performers: {}", cause),
    }
}
