// Math utilities and helper functions

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Clamp an input axis to [-1, 1], mapping NaN to 0
pub fn clamp_axis(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        clamp(value, -1.0, 1.0)
    }
}

/// Check if two f32 values are approximately equal
pub fn approx_equal(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}
