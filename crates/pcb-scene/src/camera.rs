use serde::Serialize;

use crate::model::Dimensions;

/// Multiple of the larger in-plane board dimension used for the analytic
/// camera distance.
const DISTANCE_FACTOR: f64 = 2.0;
const FIELD_OF_VIEW_DEG: f64 = 45.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraPose {
    pub position: [f64; 3],
    pub look: [f64; 3],
    pub up: [f64; 3],
    pub fov_deg: f64,
}

/// Analytic pose that frames the board: the camera sits on the board normal,
/// max(width, height) x 2 above the center, looking back down at it.
///
/// This is only a seed. Callers follow up with the renderer's fit-to-extents
/// adjustment, which is the authoritative framing and absorbs any error in
/// the distance formula.
pub fn frame_board(dims: &Dimensions) -> CameraPose {
    let center = [dims.width / 2.0, dims.height / 2.0, dims.thickness / 2.0];
    let distance = dims.width.max(dims.height) * DISTANCE_FACTOR;
    CameraPose {
        position: [center[0], center[1], center[2] + distance],
        look: [0.0, 0.0, -distance],
        up: [0.0, 1.0, 0.0],
        fov_deg: FIELD_OF_VIEW_DEG,
    }
}
