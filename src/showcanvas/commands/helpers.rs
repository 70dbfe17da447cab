use crate::error::{Result, ShowCanvasError};
use crate::model::Show;
use std::fmt;
use std::str::FromStr;

/// How a user points at a show: its 1-based position in the visible list, or its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowSelector {
    Index(usize),
    Id(String),
}

impl FromStr for ShowSelector {
    type Err = ShowCanvasError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ShowCanvasError::ShowNotFound("(empty selector)".to_string()));
        }
        match s.parse::<usize>() {
            Ok(0) => Err(ShowCanvasError::ShowNotFound("0 (lists start at 1)".to_string())),
            Ok(n) => Ok(ShowSelector::Index(n)),
            Err(_) => Ok(ShowSelector::Id(s.to_string())),
        }
    }
}

impl fmt::Display for ShowSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShowSelector::Index(n) => write!(f, "{}", n),
            ShowSelector::Id(id) => f.write_str(id),
        }
    }
}

/// Resolve a selector against the list the user is looking at.
///
/// Ids are looked up in `visible` first and then in `all`, so a show hidden by the
/// current search can still be opened by id.
pub fn find_show<'a>(
    visible: &[&'a Show],
    all: &'a [Show],
    selector: &ShowSelector,
) -> Result<&'a Show> {
    let found = match selector {
        ShowSelector::Index(n) => n.checked_sub(1).and_then(|i| visible.get(i)).copied(),
        ShowSelector::Id(id) => visible
            .iter()
            .copied()
            .find(|show| &show.id == id)
            .or_else(|| all.iter().find(|show| &show.id == id)),
    };
    found.ok_or_else(|| ShowCanvasError::ShowNotFound(selector.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::memory::fixtures::ShowFixture;

    #[test]
    fn parses_indexes_and_ids() {
        assert_eq!("2".parse::<ShowSelector>().unwrap(), ShowSelector::Index(2));
        assert_eq!(
            "show-42".parse::<ShowSelector>().unwrap(),
            ShowSelector::Id("show-42".into())
        );
        assert!("0".parse::<ShowSelector>().is_err());
        assert!(" ".parse::<ShowSelector>().is_err());
    }

    #[test]
    fn finds_by_position_in_visible_list() {
        let all = vec![
            ShowFixture::new("A").show,
            ShowFixture::new("B").show,
            ShowFixture::new("C").show,
        ];
        let visible = vec![&all[2], &all[0]];

        let found = find_show(&visible, &all, &ShowSelector::Index(1)).unwrap();
        assert_eq!(found.title, "C");
        assert!(find_show(&visible, &all, &ShowSelector::Index(3)).is_err());
    }

    #[test]
    fn finds_hidden_shows_by_id() {
        let all = vec![ShowFixture::new("A").show, ShowFixture::new("B").show];
        let visible = vec![&all[0]];

        let found = find_show(&visible, &all, &ShowSelector::Id("b".into())).unwrap();
        assert_eq!(found.title, "B");
        assert!(matches!(
            find_show(&visible, &all, &ShowSelector::Id("zzz".into())),
            Err(ShowCanvasError::ShowNotFound(_))
        ));
    }
}
