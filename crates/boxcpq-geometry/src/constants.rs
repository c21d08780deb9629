//! Fixed geometric constants, in millimeters

/// Depth of each lid wall, added on both sides of the lid face
pub const LID_WALL_DEPTH_MM: f64 = 25.0;

/// Height of the magnet strip on magnetic lids
pub const MAGNET_STRIP_HEIGHT_MM: f64 = 20.0;

/// Depth of the sleeve flap
pub const SLEEVE_FLAP_DEPTH_MM: f64 = 15.0;

/// Extra diameter of a round lid over its base (3 mm each side)
pub const ROUND_LID_DIAMETER_ALLOWANCE_MM: f64 = 6.0;

/// Lid face clearance, as a multiple of cardboard thickness
pub const LID_CLEARANCE_THICKNESS_FACTOR: f64 = 3.0;

/// Inner dimensions of the corrugated shipping carton
pub const SHIPPING_CARTON_MM: [f64; 3] = [500.0, 350.0, 350.0];

/// Width below or at which a magnetic lid needs a single magnet pair
pub const SINGLE_MAGNET_PAIR_MAX_WIDTH_MM: f64 = 100.0;
