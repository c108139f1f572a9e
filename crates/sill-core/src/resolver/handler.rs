use tracing::debug;

use super::types::{FLOOR_ID, ScreenGeometry, Segment};
use crate::geometry::{Point3, ScreenSpacePoints, WindowRect};
use crate::window::WindowRecord;

/// Translate an OS pixel rectangle into Y-up screen space on `screen`.
pub fn to_screen_points(rect: &WindowRect, screen: &ScreenGeometry) -> ScreenSpacePoints {
    let left = rect.left as f32 - screen.origin_x;
    let right = rect.right as f32 - screen.origin_x;
    let top = screen.height - rect.top as f32;
    let bottom = screen.height - rect.bottom as f32;

    ScreenSpacePoints {
        top_left: Point3::new(left, top, screen.depth),
        top_right: Point3::new(right, top, screen.depth),
        bottom_right: Point3::new(right, bottom, screen.depth),
        bottom_left: Point3::new(left, bottom, screen.depth),
    }
}

struct Surface<'a> {
    window: &'a WindowRecord,
    points: ScreenSpacePoints,
}

impl Surface<'_> {
    fn left(&self) -> f32 {
        self.points.top_left.x
    }

    fn right(&self) -> f32 {
        self.points.top_right.x
    }

    fn top(&self) -> f32 {
        self.points.top_left.y
    }

    fn bottom(&self) -> f32 {
        self.points.bottom_left.y
    }

    /// Whether this window sits across the top edge of `other` vertically.
    fn straddles_top_of(&self, other: &Surface<'_>) -> bool {
        self.top() >= other.top() && self.bottom() < other.top()
    }
}

struct Candidate {
    segment: Segment,
    discarded: bool,
}

fn segment_id(title: &str, handle: u64, split_index: usize) -> String {
    format!("{}_{}_{}", title, handle, split_index)
}

/// Resolve the unobstructed top-edge segments of `windows`.
///
/// Windows with an empty title and the window identified by `own_handle`
/// take no part, neither as surfaces nor as occluders. Only windows with a
/// strictly smaller depth occlude. The floor segment is always appended last.
pub fn resolve_top_borders(
    windows: &[WindowRecord],
    screen: &ScreenGeometry,
    own_handle: Option<u64>,
) -> Vec<Segment> {
    let surfaces: Vec<Surface<'_>> = windows
        .iter()
        .filter(|w| !w.title.is_empty() && Some(w.handle) != own_handle)
        .map(|w| Surface {
            window: w,
            points: to_screen_points(&w.rect, screen),
        })
        .collect();

    let mut segments = Vec::new();

    for surface in &surfaces {
        let mut occluders: Vec<&Surface<'_>> = surfaces
            .iter()
            .filter(|o| o.window.depth < surface.window.depth)
            .collect();
        // Stable, so equal left edges keep their depth order.
        occluders.sort_by(|a, b| a.left().total_cmp(&b.left()));

        let mut candidates = vec![Candidate {
            segment: Segment::new(
                surface.points.top_left,
                surface.points.top_right,
                segment_id(&surface.window.title, surface.window.handle, 0),
            ),
            discarded: false,
        }];

        // Candidates appended by a split are visited by this same loop.
        let mut i = 0;
        while i < candidates.len() {
            for occluder in &occluders {
                if candidates[i].discarded {
                    break;
                }
                if !occluder.straddles_top_of(surface) {
                    continue;
                }

                let start = candidates[i].segment.start;
                let end = candidates[i].segment.end;
                let (o_left, o_right) = (occluder.left(), occluder.right());

                if o_left > start.x && o_right < end.x {
                    let split_index = candidates.len();
                    candidates[i].segment.end = Point3::new(o_left, end.y, end.z);
                    candidates.push(Candidate {
                        segment: Segment::new(
                            Point3::new(o_right, start.y, start.z),
                            end,
                            segment_id(
                                &surface.window.title,
                                surface.window.handle,
                                split_index,
                            ),
                        ),
                        discarded: false,
                    });
                } else if o_left > start.x && o_left < end.x && o_right >= end.x {
                    candidates[i].segment.end = Point3::new(o_left, end.y, end.z);
                } else if o_left <= start.x && o_right > start.x && o_right < end.x {
                    candidates[i].segment.start = Point3::new(o_right, start.y, start.z);
                } else if o_left <= start.x && o_right >= end.x {
                    candidates[i].discarded = true;
                }
            }
            i += 1;
        }

        segments.extend(
            candidates
                .into_iter()
                .filter(|c| {
                    !c.discarded
                        && c.segment.start != c.segment.end
                        && c.segment.start.y < screen.height
                })
                .map(|c| c.segment),
        );
    }

    segments.push(Segment::new(
        Point3::new(-screen.width, 0.0, screen.depth),
        Point3::new(2.0 * screen.width, 0.0, screen.depth),
        FLOOR_ID,
    ));

    debug!(
        event = "core.resolver.resolve_completed",
        windows = surfaces.len(),
        segments = segments.len()
    );

    segments
}

/// The four edges of the screen as segments: FLOOR, CEILING, WALL_LEFT, WALL_RIGHT.
pub fn display_border(screen: &ScreenGeometry) -> Vec<Segment> {
    let (w, h, z) = (screen.width, screen.height, screen.depth);
    vec![
        Segment::new(Point3::new(0.0, 0.0, z), Point3::new(w, 0.0, z), "FLOOR"),
        Segment::new(Point3::new(0.0, h, z), Point3::new(w, h, z), "CEILING"),
        Segment::new(Point3::new(0.0, 0.0, z), Point3::new(0.0, h, z), "WALL_LEFT"),
        Segment::new(Point3::new(w, 0.0, z), Point3::new(w, h, z), "WALL_RIGHT"),
    ]
}
