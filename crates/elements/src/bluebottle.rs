//! Sail and body attributes of a bluebottle element.

use crate::schema::AttributeSpec;

pub const SAIL_HEIGHT: &str = "Sail_height";
pub const SAIL_CHORD: &str = "Sail_chord";
pub const SAIL_WIDTH: &str = "Sail_width";
pub const BODY_HEIGHT: &str = "Body_height";
pub const BODY_WIDTH: &str = "Body_width";
pub const CAMBER: &str = "Camber";
pub const ORIENTATION: &str = "Orientation";
pub const BETA_A: &str = "beta_a";
pub const C_H: &str = "C_H";
pub const C_AX: &str = "C_Ax";
/// Reserved multiplier. Declared and seeded, but not read by the drift model.
pub const CURRENT_DRIFT_FACTOR: &str = "current_drift_factor";

/// Attributes appended to the passive tracer schema for bluebottle elements.
///
/// A `Sail_height` of exactly zero means "derive the height from the chord".
pub const BLUEBOTTLE_ATTRIBUTES: [AttributeSpec; 11] = [
    AttributeSpec {
        name: SAIL_HEIGHT,
        units: "m",
        description: "Height of the sail on top of float",
        default: 0.0,
    },
    AttributeSpec {
        name: SAIL_CHORD,
        units: "m",
        description: "Chord or length of sail",
        default: 0.034,
    },
    AttributeSpec {
        name: SAIL_WIDTH,
        units: "m",
        description: "Width of sail, perpendicular to the chord",
        default: 0.016,
    },
    AttributeSpec {
        name: BODY_HEIGHT,
        units: "m",
        description: "Height of the submerged body",
        default: 0.014,
    },
    AttributeSpec {
        name: BODY_WIDTH,
        units: "m",
        description: "Width of the submerged body",
        default: 0.027,
    },
    AttributeSpec {
        name: CAMBER,
        units: "1",
        description: "Ratio that indicates the bending of the sail",
        default: 0.01,
    },
    AttributeSpec {
        name: ORIENTATION,
        units: "1",
        description: "1 for right-handed (left-sailing), -1 for left-handed (right-sailing)",
        default: 1.0,
    },
    AttributeSpec {
        name: BETA_A,
        units: "degrees",
        description: "Angle of the sail relative to the wind, always positive",
        default: 40.0,
    },
    AttributeSpec {
        name: C_H,
        units: "1",
        description: "Hydrodynamic force coefficient",
        default: 1.0,
    },
    AttributeSpec {
        name: C_AX,
        units: "1",
        description: "Aerodynamic force coefficient along the axis parallel to the sail",
        default: 0.1,
    },
    AttributeSpec {
        name: CURRENT_DRIFT_FACTOR,
        units: "1",
        description: "Current drift factor",
        default: 1.0,
    },
];
