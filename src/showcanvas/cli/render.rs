use colored::Colorize;
use showcanvas::auth::{CredentialProvider, SIGNUP_URL, authorize_url};
use showcanvas::catalog::Catalog;
use showcanvas::commands::search::empty_message;
use showcanvas::commands::shows::performer_count_label;
use showcanvas::commands::{CmdMessage, MessageLevel};
use showcanvas::controller::{Controller, View};
use showcanvas::layout::{ImageSource, ImageUpload, Placement};
use showcanvas::model::Show;
use std::fmt::Write;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 80;
const CREATE_SHOW_URL: &str = "https://dragvertising.com/shows/create";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages));
}

pub(super) fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let _ = match message.level {
            MessageLevel::Info => writeln!(out, "{}", message.content.dimmed()),
            MessageLevel::Success => writeln!(out, "{}", message.content.green()),
            MessageLevel::Warning => writeln!(out, "{}", message.content.yellow()),
            MessageLevel::Error => writeln!(out, "{}", message.content.red()),
        };
    }
    out
}

/// Render whatever the controller is showing, error banner included.
pub(super) fn render_view<C: Catalog, P: CredentialProvider>(
    controller: &Controller<C, P>,
    api_url: &str,
) -> String {
    let mut out = match controller.view() {
        View::Unauthenticated => render_unauthenticated(api_url),
        View::Loading => render_loading(),
        View::ShowList { query } => render_show_list(&controller.filtered_shows(), query),
        View::ShowDetail { show, .. } => render_show_detail(show, controller.is_busy()),
    };
    if let Some(error) = controller.error() {
        out.push_str(&render_error(error));
    }
    out
}

pub(super) fn render_unauthenticated(api_url: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Dragvertising".magenta().bold());
    let _ = writeln!(out, "Import your drag show data directly into your designs");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Connect: open {} and then run `showcanvas login`",
        authorize_url(api_url).cyan()
    );
    let _ = writeln!(out, "Don't have an account? Sign up free: {}", SIGNUP_URL);
    out
}

pub(super) fn render_loading() -> String {
    format!("{}\n", "Loading your shows...".dimmed())
}

pub(super) fn render_show_list(shows: &[&Show], query: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Your Shows".bold());
    if !query.trim().is_empty() {
        let _ = writeln!(out, "{}", format!("search: \"{}\"", query.trim()).dimmed());
    }
    let _ = writeln!(out);

    if shows.is_empty() {
        let _ = writeln!(out, "{}", empty_message(query));
        let _ = writeln!(out, "Create a show: {}", CREATE_SHOW_URL);
        return out;
    }

    for (i, show) in shows.iter().enumerate() {
        let idx = format!("{:>3}. ", i + 1);
        let indent = " ".repeat(idx.width());
        let available = LINE_WIDTH.saturating_sub(idx.width());

        let _ = writeln!(out, "{}{}", idx.yellow(), truncate_to_width(&show.title, available).bold());
        let when_where = format!("{} • {}", show.show_date.short_label(), show.venue_name);
        let _ = writeln!(out, "{}{}", indent, truncate_to_width(&when_where, available));
        let _ = writeln!(out, "{}{}", indent, performer_count_label(show.lineup.len()).dimmed());
    }
    out
}

pub(super) fn render_show_detail(show: &Show, busy: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "← Back to shows".dimmed());
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", show.title.bold());
    let _ = writeln!(out, "{}", show.show_date.long_label());
    let _ = writeln!(out, "📍 {}", show.venue_name);

    if let Some(description) = show.description() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "Description".bold());
        let _ = writeln!(out, "{}", description);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", format!("Lineup ({} performers)", show.lineup.len()).bold());
    for performer in &show.lineup {
        let _ = writeln!(out, "  • {}", performer.billing_name());
    }

    let _ = writeln!(out);
    if busy {
        let _ = writeln!(out, "{}", "Inserting...".dimmed());
    } else {
        let _ = writeln!(out, "Insert: poster (show details) | grid (performer grid)");
    }
    out
}

pub(super) fn render_error(message: &str) -> String {
    format!("\n{}\n", format!("⚠ {}", message).red())
}

/// One line per placement, in submission order.
pub(super) fn render_placements(placements: &[Placement]) -> String {
    let mut out = String::new();
    for (i, placement) in placements.iter().enumerate() {
        let line = match placement {
            Placement::Text(text) => format!(
                "TEXT  @({}, {}) w{} {}px {:?} {} \"{}\"",
                text.left, text.top, text.width, text.font_size, text.font_weight, text.color, text.content
            ),
            Placement::Image(image) => {
                let source = match &image.source {
                    ImageSource::Pending(upload) => upload.url.clone(),
                    ImageSource::Resolved { asset } => asset.to_string(),
                };
                format!(
                    "IMAGE @({}, {}) {}x{} {}",
                    image.left, image.top, image.width, image.height, source
                )
            }
        };
        let _ = writeln!(out, "{:>3}. {}", i + 1, line);
    }
    out
}

pub(super) fn render_uploads(uploads: &[ImageUpload]) -> String {
    let mut out = String::new();
    for upload in uploads {
        let _ = writeln!(out, "{} {} ({})", "upload".dimmed(), upload.url, upload.mime_type);
    }
    out
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use showcanvas::layout::LayoutKind;
    use showcanvas::model::{Performer, ShowDate};

    fn show() -> Show {
        let mut show = Show::new(
            "s1",
            "Glitter Brunch",
            "2025-03-05T20:00:00".parse::<ShowDate>().unwrap(),
            "The Lounge",
        );
        show.lineup = vec![
            Performer::new("p1", "Alex").with_stage_name("Lady Sparkle"),
            Performer::new("p2", "Miss Tique"),
        ];
        show
    }

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn list_rows_have_date_venue_and_count() {
        plain();
        let show = show();
        let out = render_show_list(&[&show], "");
        assert!(out.contains("  1. Glitter Brunch"));
        assert!(out.contains("Mar 5 • The Lounge"));
        assert!(out.contains("2 performers"));
    }

    #[test]
    fn empty_list_depends_on_search() {
        plain();
        assert!(render_show_list(&[], "").contains("No shows found"));
        let out = render_show_list(&[], "pier");
        assert!(out.contains("No shows match your search"));
        assert!(out.contains(CREATE_SHOW_URL));
    }

    #[test]
    fn detail_lists_billing_names() {
        plain();
        let out = render_show_detail(&show(), false);
        assert!(out.contains("Wednesday, March 5, 2025"));
        assert!(out.contains("Lineup (2 performers)"));
        assert!(out.contains("  • Lady Sparkle"));
        assert!(!out.contains("Description"));
        assert!(render_show_detail(&show(), true).contains("Inserting..."));
    }

    #[test]
    fn unauthenticated_points_at_authorize_url() {
        plain();
        let out = render_unauthenticated("https://api.example.com");
        assert!(out.contains("https://api.example.com/auth/canva/authorize"));
        assert!(out.contains(SIGNUP_URL));
    }

    #[test]
    fn placements_are_numbered_in_order() {
        plain();
        let out = render_placements(&LayoutKind::Poster.layout(&show()));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("  1. TEXT"));
        assert!(lines[0].contains("\"GLITTER BRUNCH\""));
        assert!(lines[2].contains("\"FEATURING\""));
    }

    #[test]
    fn messages_keep_their_order() {
        plain();
        let out = render_messages(&[
            CmdMessage::warning("Skipped image"),
            CmdMessage::success("✨ 2 performers inserted!"),
        ]);
        assert_eq!(out, "Skipped image\n✨ 2 performers inserted!\n");
    }

    #[test]
    fn truncates_wide_titles() {
        assert_eq!(truncate_to_width("short", 10), "short");
        let cut = truncate_to_width("a very long show title", 8);
        assert!(cut.ends_with('…'));
        assert!(cut.width() <= 8);
    }
}
