use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::types::SyncReport;
use crate::collider::BoundaryCollider;
use crate::pool::{ObjectPool, PoolHandle};
use crate::resolver::Segment;
use crate::transform::CoordinateTransform;

/// Maps segment IDs to pooled colliders across frames.
pub struct BoundarySynchronizer {
    pool: ObjectPool<BoundaryCollider>,
    colliders: HashMap<String, PoolHandle>,
    order: Vec<String>,
}

impl BoundarySynchronizer {
    pub fn new(pool: ObjectPool<BoundaryCollider>) -> Self {
        Self {
            pool,
            colliders: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Synchronizer over a fresh pool of `baseline` colliders.
    pub fn with_baseline(baseline: usize) -> Self {
        Self::new(ObjectPool::new(baseline, BoundaryCollider::new))
    }

    /// Bring the colliders in line with `segments`.
    ///
    /// IDs missing from `segments` are retired first, then every segment
    /// either reconfigures the collider already holding its ID or checks out
    /// a new one.
    pub fn sync(
        &mut self,
        segments: &[Segment],
        draw_debug: bool,
        transform: &dyn CoordinateTransform,
    ) -> SyncReport {
        let mut report = SyncReport::default();

        let live: HashSet<&str> = segments.iter().map(|s| s.id.as_str()).collect();
        let stale: Vec<String> = self
            .colliders
            .keys()
            .filter(|id| !live.contains(id.as_str()))
            .cloned()
            .collect();
        for id in stale {
            if let Some(handle) = self.colliders.remove(&id) {
                self.pool.retire(handle);
                report.retired += 1;
            }
        }

        let mut order = Vec::with_capacity(segments.len());
        let mut seen: HashSet<&str> = HashSet::with_capacity(segments.len());
        for segment in segments {
            let handle = match self.colliders.get(&segment.id) {
                Some(&handle) => {
                    report.reconfigured += 1;
                    handle
                }
                None => {
                    let handle = self.pool.get_next();
                    self.colliders.insert(segment.id.clone(), handle);
                    report.allocated += 1;
                    handle
                }
            };
            if seen.insert(segment.id.as_str()) {
                order.push(segment.id.clone());
            }
            if let Some(collider) = self.pool.get_mut(handle) {
                collider.configure(segment, draw_debug, transform);
            }
        }
        self.order = order;

        report.active = self.pool.active_count();
        debug!(
            event = "core.sync.frame_completed",
            allocated = report.allocated,
            retired = report.retired,
            reconfigured = report.reconfigured,
            active = report.active
        );
        report
    }

    /// Active colliders in the order of the last synchronized segment list.
    pub fn boundaries(&self) -> Vec<&BoundaryCollider> {
        self.order
            .iter()
            .filter_map(|id| self.colliders.get(id))
            .filter_map(|&handle| self.pool.get(handle))
            .collect()
    }

    pub fn collider(&self, id: &str) -> Option<&BoundaryCollider> {
        self.colliders
            .get(id)
            .and_then(|&handle| self.pool.get(handle))
    }

    pub fn handle(&self, id: &str) -> Option<PoolHandle> {
        self.colliders.get(id).copied()
    }

    /// Shrink the pool toward its baseline. Returns the number destroyed.
    pub fn cull_excess(&mut self) -> usize {
        self.pool.cull_excess()
    }

    pub fn pool(&self) -> &ObjectPool<BoundaryCollider> {
        &self.pool
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point3;
    use crate::transform::OrthoCameraTransform;
    use sill_config::PlayspaceConfig;

    fn transform() -> OrthoCameraTransform {
        OrthoCameraTransform::new(800.0, 600.0, &PlayspaceConfig::default())
    }

    fn seg(id: &str, x0: f32, x1: f32) -> Segment {
        Segment::new(Point3::new(x0, 300.0, 2.0), Point3::new(x1, 300.0, 2.0), id)
    }

    #[test]
    fn test_first_frame_allocates_everything() {
        let mut sync = BoundarySynchronizer::with_baseline(4);
        let report = sync.sync(
            &[seg("A_1_0", 0.0, 100.0), seg("B_2_0", 200.0, 300.0)],
            false,
            &transform(),
        );

        assert_eq!(
            report,
            SyncReport {
                allocated: 2,
                retired: 0,
                reconfigured: 0,
                active: 2
            }
        );
        assert_eq!(sync.collider("A_1_0").map(|c| c.id()), Some("A_1_0"));
    }

    #[test]
    fn test_diff_law_between_frames() {
        let t = transform();
        let mut sync = BoundarySynchronizer::with_baseline(4);
        sync.sync(
            &[seg("A_1_0", 0.0, 100.0), seg("B_2_0", 200.0, 300.0), seg("C_3_0", 400.0, 500.0)],
            false,
            &t,
        );
        let kept = sync.handle("B_2_0");

        let report = sync.sync(
            &[seg("B_2_0", 210.0, 300.0), seg("D_4_0", 0.0, 50.0)],
            false,
            &t,
        );

        assert_eq!(report.allocated, 1);
        assert_eq!(report.retired, 2);
        assert_eq!(report.reconfigured, 1);
        assert_eq!(report.active, 2);
        assert_eq!(sync.handle("B_2_0"), kept);
        assert!(sync.collider("A_1_0").is_none());
        assert_eq!(
            sync.collider("B_2_0").map(|c| c.screen_bounds().start.x),
            Some(210.0)
        );
    }

    #[test]
    fn test_identical_frames_only_reconfigure() {
        let t = transform();
        let segments = vec![seg("A_1_0", 0.0, 100.0), seg("FLOOR_0_0", -800.0, 1600.0)];
        let mut sync = BoundarySynchronizer::with_baseline(2);
        sync.sync(&segments, false, &t);
        let created = sync.pool().total_count();

        for _ in 0..5 {
            let report = sync.sync(&segments, false, &t);
            assert_eq!(report.allocated, 0);
            assert_eq!(report.retired, 0);
            assert_eq!(report.reconfigured, 2);
        }
        assert_eq!(sync.pool().total_count(), created);
    }

    #[test]
    fn test_empty_frame_retires_all() {
        let t = transform();
        let mut sync = BoundarySynchronizer::with_baseline(2);
        sync.sync(&[seg("A_1_0", 0.0, 100.0)], false, &t);
        let report = sync.sync(&[], false, &t);

        assert_eq!(report.retired, 1);
        assert_eq!(report.active, 0);
        assert!(sync.is_empty());
        assert!(sync.boundaries().is_empty());
    }

    #[test]
    fn test_duplicate_ids_share_one_collider() {
        let t = transform();
        let mut sync = BoundarySynchronizer::with_baseline(2);
        let report = sync.sync(&[seg("A_1_0", 0.0, 100.0), seg("A_1_0", 200.0, 300.0)], false, &t);

        assert_eq!(report.allocated, 1);
        assert_eq!(report.reconfigured, 1);
        assert_eq!(report.active, 1);
        assert_eq!(sync.boundaries().len(), 1);
        assert_eq!(
            sync.collider("A_1_0").map(|c| c.screen_bounds().start.x),
            Some(200.0)
        );
    }

    #[test]
    fn test_boundaries_follow_segment_order() {
        let t = transform();
        let mut sync = BoundarySynchronizer::with_baseline(4);
        sync.sync(&[seg("A_1_0", 0.0, 100.0), seg("B_2_0", 200.0, 300.0)], false, &t);
        sync.sync(&[seg("C_3_0", 0.0, 10.0), seg("B_2_0", 200.0, 300.0)], false, &t);

        let ids: Vec<&str> = sync.boundaries().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["C_3_0", "B_2_0"]);
    }
}
