use crate::model::Show;

/// Shows whose title or venue contains `query`, ignoring case, in catalog order.
/// A blank query keeps everything.
pub fn run<'a>(shows: &'a [Show], query: &str) -> Vec<&'a Show> {
    let query = query.trim();
    if query.is_empty() {
        return shows.iter().collect();
    }
    shows.iter().filter(|show| show.matches(query)).collect()
}

pub fn empty_message(query: &str) -> &'static str {
    if query.trim().is_empty() {
        "No shows found"
    } else {
        "No shows match your search"
    }
}
