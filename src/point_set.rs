use anyhow::*;

/// Read-only view over `size` points of `dimension` coordinates, stored row by row.
#[derive(Clone, Debug, PartialEq)]
pub struct PointSet {
    data: Vec<f64>,
    dimension: usize,
}

impl PointSet {
    pub fn new(data: Vec<f64>, dimension: usize) -> Result<Self> {
        if data.is_empty() {
            return Ok(Self { data, dimension });
        }
        ensure!(dimension > 0, "points with {} coordinates need a non-zero dimension", data.len());
        ensure!(
            data.len() % dimension == 0,
            "buffer of {} coordinates is not a whole number of {}-dimensional points",
            data.len(),
            dimension
        );
        Ok(Self { data, dimension })
    }

    pub fn from_points<P: AsRef<[f64]>>(points: &[P]) -> Result<Self> {
        let dimension = points.first().map(|p| p.as_ref().len()).unwrap_or(0);
        let mut data = Vec::with_capacity(points.len() * dimension);
        for (i, point) in points.iter().enumerate() {
            let point = point.as_ref();
            ensure!(
                point.len() == dimension,
                "point {} has {} coordinates, expected {}",
                i,
                point.len(),
                dimension
            );
            data.extend_from_slice(point);
        }
        Self::new(data, dimension)
    }

    pub fn from_f32(data: &[f32], dimension: usize) -> Result<Self> {
        Self::new(data.iter().map(|&x| x as f64).collect(), dimension)
    }

    pub fn size(&self) -> usize {
        if self.dimension == 0 {
            0
        } else {
            self.data.len() / self.dimension
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn coord(&self, point: usize, axis: usize) -> f64 {
        assert!(
            axis < self.dimension,
            "axis {} out of range for dimension {}",
            axis,
            self.dimension
        );
        self.data[point * self.dimension + axis]
    }

    pub fn point(&self, point: usize) -> &[f64] {
        assert!(point < self.size(), "point {} out of range for {} points", point, self.size());
        let start = point * self.dimension;
        &self.data[start..start + self.dimension]
    }

    pub fn iter(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.dimension.max(1))
    }
}

pub(crate) fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_read_back_in_order() {
        let points = PointSet::from_points(&[[0.0, 1.0], [2.0, 3.0], [4.0, 5.0]]).unwrap();
        assert_eq!(points.size(), 3);
        assert_eq!(points.dimension(), 2);
        assert_eq!(points.coord(1, 0), 2.0);
        assert_eq!(points.coord(2, 1), 5.0);
        assert_eq!(points.point(0), &[0.0, 1.0]);
        assert_eq!(points.iter().count(), 3);
    }

    #[test]
    fn rejects_ragged_buffers() {
        assert!(PointSet::new(vec![1.0, 2.0, 3.0], 2).is_err());
        assert!(PointSet::new(vec![1.0], 0).is_err());
        assert!(PointSet::from_points(&[vec![1.0, 2.0], vec![3.0]]).is_err());
    }

    #[test]
    fn empty_set_has_no_points() {
        let points = PointSet::new(vec![], 3).unwrap();
        assert!(points.is_empty());
        assert_eq!(points.dimension(), 3);
        assert_eq!(points.iter().count(), 0);
    }

    #[test]
    #[should_panic]
    fn coord_out_of_range_panics() {
        let points = PointSet::from_points(&[[0.0, 1.0]]).unwrap();
        points.coord(0, 2);
    }
}
