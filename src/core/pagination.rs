use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageLink {
    Page { number: u32, active: bool },
    Ellipsis,
}

/// Links for the pager: first, last and current±1 are shown, the page just
/// outside that window collapses into an ellipsis.
pub fn page_links(current: u32, total_pages: u32) -> Vec<PageLink> {
    page_links_with_window(current, total_pages, 1)
}

/// Same rule with a wider or narrower window around the current page.
pub fn page_links_with_window(current: u32, total_pages: u32, radius: u32) -> Vec<PageLink> {
    if total_pages <= 1 {
        return Vec::new();
    }

    let mut links = Vec::new();
    for page in 1..=total_pages {
        let distance = page.abs_diff(current);
        if page == 1 || page == total_pages || distance <= radius {
            links.push(PageLink::Page {
                number: page,
                active: page == current,
            });
        } else if distance == radius + 1 {
            links.push(PageLink::Ellipsis);
        }
    }
    links
}

/// Clamps a requested page into `[1, total_pages]`.
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

pub struct PagerLine<'a>(pub &'a [PageLink]);

impl fmt::Display for PagerLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, link) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match link {
                PageLink::Page { number, active: true } => write!(f, "[{}]", number)?,
                PageLink::Page { number, .. } => write!(f, "{}", number)?,
                PageLink::Ellipsis => f.write_str("…")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(links: &[PageLink]) -> Vec<u32> {
        links
            .iter()
            .filter_map(|l| match l {
                PageLink::Page { number, .. } => Some(*number),
                PageLink::Ellipsis => None,
            })
            .collect()
    }

    #[test]
    fn test_middle_page_collapses_both_sides() {
        let links = page_links(5, 10);
        assert_eq!(numbers(&links), vec![1, 4, 5, 6, 10]);
        assert_eq!(
            links,
            vec![
                PageLink::Page { number: 1, active: false },
                PageLink::Ellipsis,
                PageLink::Page { number: 4, active: false },
                PageLink::Page { number: 5, active: true },
                PageLink::Page { number: 6, active: false },
                PageLink::Ellipsis,
                PageLink::Page { number: 10, active: false },
            ]
        );
    }

    #[test]
    fn test_wider_window_keeps_two_neighbours() {
        let links = page_links_with_window(5, 10, 2);
        assert_eq!(numbers(&links), vec![1, 3, 4, 5, 6, 7, 10]);
        assert_eq!(links[1], PageLink::Ellipsis);
        assert_eq!(links[links.len() - 2], PageLink::Ellipsis);
    }

    #[test]
    fn test_single_page_has_no_pager() {
        assert!(page_links(1, 1).is_empty());
        assert!(page_links(1, 0).is_empty());
    }

    #[test]
    fn test_first_page_window() {
        let links = page_links(1, 10);
        assert_eq!(numbers(&links), vec![1, 2, 10]);
        assert_eq!(links.iter().filter(|l| **l == PageLink::Ellipsis).count(), 1);
    }

    #[test]
    fn test_adjacent_pages_do_not_emit_ellipsis() {
        let links = page_links(3, 4);
        assert_eq!(numbers(&links), vec![1, 2, 3, 4]);
        assert!(!links.contains(&PageLink::Ellipsis));
    }

    #[test]
    fn test_pager_line_marks_active_page() {
        let links = page_links(2, 3);
        assert_eq!(PagerLine(&links).to_string(), "1 [2] 3");
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 5), 1);
        assert_eq!(clamp_page(9, 5), 5);
        assert_eq!(clamp_page(3, 0), 1);
    }
}
