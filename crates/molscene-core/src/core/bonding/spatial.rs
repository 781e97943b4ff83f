use nalgebra::Point3;
use std::collections::HashMap;

/// Uniform hash grid over 3D space for neighbor candidate queries.
///
/// Every point lands in exactly one cubic cell; querying the 3x3x3
/// neighborhood around a position returns every stored point within
/// `cell_size` of it (plus some farther candidates the caller filters by
/// actual distance).
pub(crate) struct SpatialGrid {
    cells: HashMap<(i32, i32, i32), Vec<usize>>,
    cell_size: f64,
}

impl SpatialGrid {
    pub fn with_capacity(cell_size: f64, expected_points: usize) -> Self {
        Self {
            cells: HashMap::with_capacity(expected_points),
            cell_size,
        }
    }

    fn cell_key(&self, position: &Point3<f64>) -> (i32, i32, i32) {
        (
            (position.x / self.cell_size).floor() as i32,
            (position.y / self.cell_size).floor() as i32,
            (position.z / self.cell_size).floor() as i32,
        )
    }

    pub fn insert(&mut self, position: &Point3<f64>, index: usize) {
        let key = self.cell_key(position);
        self.cells.entry(key).or_default().push(index);
    }

    pub fn query_neighbors(&self, position: &Point3<f64>, out: &mut Vec<usize>) {
        out.clear();
        let (cx, cy, cz) = self.cell_key(position);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    if let Some(indices) = self.cells.get(&(cx + dx, cy + dy, cz + dz)) {
                        out.extend_from_slice(indices);
                    }
                }
            }
        }
    }
}
