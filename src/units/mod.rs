use crate::profile::Height;

const CM_PER_FOOT: f64 = 30.48;
const CM_PER_INCH: f64 = 2.54;

/// Resolve a height to whole centimeters.
pub fn height_to_cm(height: &Height) -> u32 {
    let cm = match *height {
        Height::Centimeters { cm } => cm,
        Height::FeetInches { feet, inches } => feet * CM_PER_FOOT + inches * CM_PER_INCH,
    };
    cm.round().max(0.0) as u32
}
