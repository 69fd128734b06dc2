//! Scroll-driven layout decisions: which TOC entry follows the reader, where
//! the sticky TOC sits, and when the back-to-top button shows.
//!
//! All positions are document-relative pixels, as reported by the host.

/// Headings count as reached this far before they hit the top of the viewport.
pub const HEADER_OFFSET: f64 = 30.0;

/// Gap kept between the sticky TOC and the viewport or footer edge.
pub const TOC_SPACING: f64 = 20.0;

pub const BACK_TO_TOP_THRESHOLD: f64 = 100.0;

/// Index of the TOC link to highlight for `scroll_top`.
///
/// Link `i` is active while `top[i] - HEADER_OFFSET < scroll_top <=
/// top[i + 1] - HEADER_OFFSET`; the last link stays active to the end of the
/// page. Above the first heading nothing is active.
pub fn active_toc_link(heading_tops: &[f64], scroll_top: f64) -> Option<usize> {
    heading_tops.iter().enumerate().position(|(i, top)| {
        let current = top - HEADER_OFFSET;
        let next = heading_tops
            .get(i + 1)
            .map_or(f64::INFINITY, |next| next - HEADER_OFFSET);
        current < scroll_top && scroll_top <= next
    })
}

pub fn show_back_to_top(scroll_top: f64) -> bool {
    scroll_top > BACK_TO_TOP_THRESHOLD
}

/// How the TOC is positioned for the current scroll offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TocPosition {
    /// In the page flow, absolutely positioned at `top`.
    Anchored { top: f64 },
    /// Pinned to the viewport at `top`.
    Fixed { top: f64 },
}

/// Measurements of the TOC and the post footer taken at page load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TocLayout {
    pub toc_top: f64,
    pub toc_height: f64,
    pub footer_top: f64,
}

impl TocLayout {
    /// Scroll offset at which the TOC starts sticking.
    pub fn min_scroll_top(&self) -> f64 {
        self.toc_top - TOC_SPACING
    }

    /// Lowest document offset the TOC may take without overlapping the footer.
    pub fn max_toc_top(&self) -> f64 {
        self.footer_top - self.toc_height - TOC_SPACING
    }

    pub fn position(&self, scroll_top: f64) -> TocPosition {
        let min = self.min_scroll_top();
        if scroll_top < min {
            TocPosition::Anchored { top: min }
        } else {
            TocPosition::Fixed { top: TOC_SPACING }
        }
    }

    /// Document offset for a pinned TOC currently at `toc_offset`.
    ///
    /// When the active link has scrolled below the middle of the viewport the
    /// TOC moves up so the link sits at the middle. The result never passes
    /// [`max_toc_top`](Self::max_toc_top).
    pub fn follow_offset(
        &self,
        toc_offset: f64,
        active_link_offset: Option<f64>,
        scroll_top: f64,
        viewport_height: f64,
    ) -> f64 {
        let max = self.max_toc_top();
        let center = scroll_top + viewport_height / 2.0;

        let offset = match active_link_offset {
            Some(link) if link > center => max.min(center + (toc_offset - link)),
            _ => toc_offset,
        };
        offset.min(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOPS: [f64; 3] = [300.0, 800.0, 1500.0];

    #[test]
    fn nothing_active_above_first_heading() {
        assert_eq!(active_toc_link(&TOPS, 0.0), None);
        assert_eq!(active_toc_link(&TOPS, 270.0), None);
        assert_eq!(active_toc_link(&[], 500.0), None);
    }

    #[test]
    fn active_link_switches_at_the_header_offset() {
        assert_eq!(active_toc_link(&TOPS, 270.5), Some(0));
        assert_eq!(active_toc_link(&TOPS, 770.0), Some(0));
        assert_eq!(active_toc_link(&TOPS, 771.0), Some(1));
        assert_eq!(active_toc_link(&TOPS, 1470.0), Some(1));
    }

    #[test]
    fn last_link_stays_active_to_the_end() {
        assert_eq!(active_toc_link(&TOPS, 1471.0), Some(2));
        assert_eq!(active_toc_link(&TOPS, 1e9), Some(2));
    }

    #[test]
    fn back_to_top_appears_past_threshold() {
        assert!(!show_back_to_top(0.0));
        assert!(!show_back_to_top(100.0));
        assert!(show_back_to_top(101.0));
    }

    #[test]
    fn toc_sticks_once_scrolled_past_its_spacing() {
        let layout = TocLayout {
            toc_top: 400.0,
            toc_height: 600.0,
            footer_top: 5000.0,
        };
        assert_eq!(layout.position(0.0), TocPosition::Anchored { top: 380.0 });
        assert_eq!(layout.position(379.0), TocPosition::Anchored { top: 380.0 });
        assert_eq!(layout.position(380.0), TocPosition::Fixed { top: TOC_SPACING });
        assert_eq!(layout.max_toc_top(), 4380.0);
    }

    #[test]
    fn pinned_toc_follows_active_link_but_not_into_the_footer() {
        let layout = TocLayout {
            toc_top: 400.0,
            toc_height: 600.0,
            footer_top: 5000.0,
        };

        // link above the viewport middle: leave the TOC alone
        assert_eq!(layout.follow_offset(1020.0, Some(1200.0), 1000.0, 800.0), 1020.0);
        assert_eq!(layout.follow_offset(1020.0, None, 1000.0, 800.0), 1020.0);

        // link 300px below the middle (1400): move the TOC up by as much
        assert_eq!(layout.follow_offset(1020.0, Some(1700.0), 1000.0, 800.0), 720.0);

        // near the footer the TOC is clamped
        assert_eq!(layout.follow_offset(4600.0, None, 4500.0, 800.0), 4380.0);
    }
}
