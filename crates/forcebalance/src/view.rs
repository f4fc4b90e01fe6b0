//! Borrowed attribute columns of a bluebottle population.

use bluebottle_elements::ElementTable;
use bluebottle_elements::bluebottle::{
    BETA_A, BODY_HEIGHT, BODY_WIDTH, C_AX, C_H, CAMBER, ORIENTATION, SAIL_CHORD, SAIL_HEIGHT,
    SAIL_WIDTH,
};

use crate::ForceBalanceError;

/// Read-only view of the attribute columns the force balance reads.
#[derive(Debug, Clone, Copy)]
pub struct BluebottleView<'a> {
    pub sail_height: &'a [f64],
    pub sail_chord: &'a [f64],
    pub sail_width: &'a [f64],
    pub body_height: &'a [f64],
    pub body_width: &'a [f64],
    pub camber: &'a [f64],
    pub orientation: &'a [f64],
    pub beta_a_deg: &'a [f64],
    pub c_h: &'a [f64],
    pub c_ax: &'a [f64],
}

impl<'a> BluebottleView<'a> {
    pub fn from_table(table: &'a ElementTable) -> Result<Self, ForceBalanceError> {
        let column = |name: &'static str| {
            table
                .column(name)
                .ok_or(ForceBalanceError::MissingAttribute(name))
        };
        Ok(Self {
            sail_height: column(SAIL_HEIGHT)?,
            sail_chord: column(SAIL_CHORD)?,
            sail_width: column(SAIL_WIDTH)?,
            body_height: column(BODY_HEIGHT)?,
            body_width: column(BODY_WIDTH)?,
            camber: column(CAMBER)?,
            orientation: column(ORIENTATION)?,
            beta_a_deg: column(BETA_A)?,
            c_h: column(C_H)?,
            c_ax: column(C_AX)?,
        })
    }

    pub fn len(&self) -> usize {
        self.sail_height.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sail_height.is_empty()
    }
}
