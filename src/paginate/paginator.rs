use crate::{layout::sizing::PageSizer, text::metrics::Typesetter};

/// Consecutive points rendered together on one points page.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PageGroup {
    /// 1-based number of the first point in the group.
    pub start_number: usize,
    pub points: Vec<String>,
    /// Single point too tall for any page; drawn clipped.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub overflow: bool,
}

impl PageGroup {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Whether `points` rendered as one page stay inside the canvas height.
pub fn fits<S: AsRef<str>>(ts: &mut Typesetter, sizer: &PageSizer<'_>, points: &[S]) -> bool {
    sizer.points_height(ts, points) <= sizer.canvas.height as f32
}

/// Split `points` greedily into page groups, in input order.
///
/// A point is appended to the current group while the group still fits; otherwise it opens the
/// next group. A point that does not fit even alone becomes its own group flagged `overflow`.
#[tracing::instrument(skip_all, fields(points = points.len()))]
pub fn paginate<S: AsRef<str>>(
    ts: &mut Typesetter,
    sizer: &PageSizer<'_>,
    points: &[S],
) -> Vec<PageGroup> {
    let mut groups: Vec<PageGroup> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut start = 0usize;

    for (i, point) in points.iter().enumerate() {
        let point = point.as_ref();
        current.push(point.to_owned());
        if fits(ts, sizer, &current) {
            continue;
        }

        current.pop();
        if !current.is_empty() {
            groups.push(group(start, std::mem::take(&mut current), false));
            start = i;
            current.push(point.to_owned());
            if fits(ts, sizer, &current) {
                continue;
            }
            current.pop();
        }

        tracing::warn!(number = i + 1, "point does not fit on a page by itself; it will be clipped");
        groups.push(group(i, vec![point.to_owned()], true));
        start = i + 1;
    }

    if !current.is_empty() {
        groups.push(group(start, current, false));
    }

    tracing::debug!(pages = groups.len(), "paginated points");
    groups
}

fn group(start: usize, points: Vec<String>, overflow: bool) -> PageGroup {
    PageGroup {
        start_number: start + 1,
        points,
        overflow,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/paginate/paginator.rs"]
mod tests;
