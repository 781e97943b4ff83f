use nalgebra::Point3;

pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (a - b).norm()
}

pub fn min_distance_to_set(point: &Point3<f64>, targets: &[Point3<f64>]) -> Option<f64> {
    targets
        .iter()
        .map(|t| distance(point, t))
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
}
