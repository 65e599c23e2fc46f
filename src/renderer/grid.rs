//! Workgroup sizing and dispatch-grid policy.

/// Threads per workgroup along x and y.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkgroupSize {
    /// Execution width; threads per group along x.
    pub width: u32,
    /// `max_threads / width`; threads per group along y.
    pub height: u32,
}

/// Number of workgroups to launch along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchGrid {
    /// Groups along x.
    pub x: u32,
    /// Groups along y.
    pub y: u32,
    /// Always 1.
    pub z: u32,
}

impl WorkgroupSize {
    /// Group shape from the kernel's execution width and its maximum
    /// threads per group. Both axes are at least 1.
    #[must_use]
    pub fn new(execution_width: u32, max_threads: u32) -> Self {
        let width = execution_width.max(1);
        Self {
            width,
            height: (max_threads / width).max(1),
        }
    }

    /// Read the group shape an entry point declares, treating its x extent
    /// as the execution width and the product of all three as the thread
    /// budget.
    #[must_use]
    pub fn from_kernel(module: &naga::Module, entry_point: &str) -> Option<Self> {
        module
            .entry_points
            .iter()
            .find(|ep| ep.name == entry_point)
            .map(|ep| {
                let [x, y, z] = ep.workgroup_size;
                Self::new(x, x.saturating_mul(y).saturating_mul(z))
            })
    }

    /// Threads in one group.
    #[must_use]
    pub fn threads(&self) -> u32 {
        self.width * self.height
    }

    /// Grid covering a `width` x `height` image: one more group than the
    /// integer quotient on each axis, so the grid always over-covers and
    /// the kernel must bounds-check.
    #[must_use]
    pub fn grid_for(&self, width: u32, height: u32) -> DispatchGrid {
        DispatchGrid {
            x: width / self.width + 1,
            y: height / self.height + 1,
            z: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_image_grid() {
        let group = WorkgroupSize::new(32, 256);
        assert_eq!(group.height, 8);
        assert_eq!(
            group.grid_for(800, 601),
            DispatchGrid { x: 26, y: 76, z: 1 }
        );
    }

    #[test]
    fn exact_multiples_still_add_a_group() {
        let group = WorkgroupSize::new(32, 256);
        assert_eq!(group.grid_for(800, 600), DispatchGrid { x: 26, y: 76, z: 1 });
        assert_eq!(group.grid_for(64, 16), DispatchGrid { x: 3, y: 3, z: 1 });
    }

    #[test]
    fn grid_always_covers_image() {
        let group = WorkgroupSize::new(16, 64);
        for (w, h) in [(1, 1), (15, 3), (16, 4), (17, 5), (1023, 767)] {
            let grid = group.grid_for(w, h);
            assert!(grid.x * group.width >= w);
            assert!(grid.y * group.height >= h);
        }
    }

    #[test]
    fn degenerate_limits_clamp_to_one() {
        let group = WorkgroupSize::new(0, 0);
        assert_eq!(group, WorkgroupSize { width: 1, height: 1 });
        let narrow = WorkgroupSize::new(64, 32);
        assert_eq!(narrow.height, 1);
        assert_eq!(narrow.threads(), 64);
    }
}
