use nalgebra::Vector2;

/// Uniform gravity acceleration (launch plane, y up).
pub fn gravity_accel(g: f64) -> Vector2<f64> {
    Vector2::new(0.0, -g)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_points_down() {
        let a = gravity_accel(9.81);
        assert_eq!(a.x, 0.0);
        assert_eq!(a.y, -9.81);
    }
}
