//! Manual control surface: per-axis edits of a transform.
//!
//! Each panel has a free-form numeric input and a range-limited slider per
//! field. Inputs that do not parse as a finite number are rejected and the
//! model keeps its previous value. Rotations are edited and displayed in
//! degrees and stored in radians.

use std::fmt;

use crate::transform::{Axis, Pose, TransformModel};

/// Inclusive slider range with a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    /// Lowest value.
    pub min: f32,
    /// Highest value.
    pub max: f32,
    /// Increment between positions.
    pub step: f32,
}

impl SliderRange {
    /// Range from `min` to `max` in `step` increments.
    #[must_use]
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    /// Clamp to the range and round to the nearest step.
    #[must_use]
    pub fn snap(&self, value: f32) -> f32 {
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }

    /// Whether `value` lies in the range.
    #[must_use]
    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Slider ranges and display precision for one panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    /// Position range per axis (x, y, z).
    pub position: [SliderRange; 3],
    /// Rotation range in degrees (all axes).
    pub rotation_deg: SliderRange,
    /// Scale range.
    pub scale: SliderRange,
    /// Sensitivity range; `None` if the panel has no sensitivity control.
    pub sensitivity: Option<SliderRange>,
    /// Decimals shown for positions.
    pub position_decimals: usize,
    /// Decimals shown for rotations (degrees).
    pub rotation_decimals: usize,
    /// Decimals shown for scale.
    pub scale_decimals: usize,
}

/// The main model's panel.
pub const LOGO_PANEL: PanelLayout = PanelLayout {
    position: [
        SliderRange::new(-10.0, 10.0, 0.1),
        SliderRange::new(-10.0, 10.0, 0.1),
        SliderRange::new(-10.0, 10.0, 0.1),
    ],
    rotation_deg: SliderRange::new(-180.0, 180.0, 1.0),
    scale: SliderRange::new(10.0, 200.0, 5.0),
    sensitivity: Some(SliderRange::new(0.1, 3.0, 0.1)),
    position_decimals: 2,
    rotation_decimals: 0,
    scale_decimals: 0,
};

/// The companion mesh's panel.
pub const COMPANION_PANEL: PanelLayout = PanelLayout {
    position: [
        SliderRange::new(-5.0, 5.0, 0.1),
        SliderRange::new(-5.0, 5.0, 0.1),
        SliderRange::new(-2.0, 15.0, 0.1),
    ],
    rotation_deg: SliderRange::new(-180.0, 180.0, 1.0),
    scale: SliderRange::new(0.1, 5.0, 0.1),
    sensitivity: None,
    position_decimals: 2,
    rotation_decimals: 1,
    scale_decimals: 2,
};

/// A single editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlField {
    /// One position component.
    Position(Axis),
    /// One rotation component.
    Rotation(Axis),
    /// Uniform scale.
    Scale,
    /// Hover tilt sensitivity.
    Sensitivity,
}

impl ControlField {
    /// Parse names like `"position.x"`, `"rotation.z"`, `"scale"`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let axis = |s: &str| match s {
            "x" => Some(Axis::X),
            "y" => Some(Axis::Y),
            "z" => Some(Axis::Z),
            _ => None,
        };
        match name.split_once('.') {
            Some(("position", a)) => axis(a).map(Self::Position),
            Some(("rotation", a)) => axis(a).map(Self::Rotation),
            None if name == "scale" => Some(Self::Scale),
            None if name == "sensitivity" => Some(Self::Sensitivity),
            _ => None,
        }
    }
}

/// Why a manual edit was refused.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlError {
    /// The text is not a number.
    NotANumber(String),
    /// The number is NaN or infinite.
    NonFinite,
    /// Scale must stay strictly positive.
    NonPositiveScale,
    /// Sensitivity cannot be negative.
    NegativeSensitivity,
    /// Manual edits are locked while a transition runs.
    TransitionActive,
    /// The panel has no such control.
    Unsupported(ControlField),
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber(text) => write!(f, "not a number: {text:?}"),
            Self::NonFinite => write!(f, "value must be finite"),
            Self::NonPositiveScale => write!(f, "scale must be positive"),
            Self::NegativeSensitivity => {
                write!(f, "sensitivity cannot be negative")
            }
            Self::TransitionActive => {
                write!(f, "manual edits are disabled during a transition")
            }
            Self::Unsupported(field) => {
                write!(f, "control not available: {field:?}")
            }
        }
    }
}

impl std::error::Error for ControlError {}

/// Parse free-form numeric input. NaN and infinities are rejected.
pub fn parse_numeric(text: &str) -> Result<f32, ControlError> {
    let value: f32 = text
        .trim()
        .parse()
        .map_err(|_| ControlError::NotANumber(text.to_owned()))?;
    if !value.is_finite() {
        return Err(ControlError::NonFinite);
    }
    Ok(value)
}

/// A validated edit in model units (rotation in radians).
///
/// Only constructible through [`ControlEdit::new`] or a [`ControlSurface`],
/// so every edit carries a finite value, a positive scale and a
/// non-negative sensitivity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlEdit {
    field: ControlField,
    value: f32,
}

impl ControlEdit {
    /// Validate a raw edit in model units.
    pub fn new(field: ControlField, value: f32) -> Result<Self, ControlError> {
        if !value.is_finite() {
            return Err(ControlError::NonFinite);
        }
        match field {
            ControlField::Scale if value <= 0.0 => Err(ControlError::NonPositiveScale),
            ControlField::Sensitivity if value < 0.0 => {
                Err(ControlError::NegativeSensitivity)
            }
            _ => Ok(Self { field, value }),
        }
    }

    /// Field being edited.
    #[must_use]
    pub fn field(&self) -> ControlField {
        self.field
    }

    /// New value in model units.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Apply to a pose. Sensitivity edits leave the pose unchanged.
    pub fn apply_to_pose(&self, pose: &mut Pose) {
        match self.field {
            ControlField::Position(axis) => axis.set(&mut pose.position, self.value),
            ControlField::Rotation(axis) => axis.set(&mut pose.rotation, self.value),
            ControlField::Scale => pose.scale = self.value,
            ControlField::Sensitivity => {}
        }
    }
}

/// Builds validated edits for one panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSurface {
    layout: PanelLayout,
}

impl ControlSurface {
    /// Surface for a panel layout.
    #[must_use]
    pub const fn new(layout: PanelLayout) -> Self {
        Self { layout }
    }

    /// The panel layout.
    #[must_use]
    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }

    /// Edit from free-form text. Rotation text is in degrees.
    ///
    /// Text inputs are not clamped to the slider range.
    pub fn input_edit(
        &self,
        field: ControlField,
        text: &str,
    ) -> Result<ControlEdit, ControlError> {
        let value = parse_numeric(text)?;
        self.edit(field, value, false)
    }

    /// Edit from a slider. The value is snapped to the slider's range.
    pub fn slider_edit(
        &self,
        field: ControlField,
        value: f32,
    ) -> Result<ControlEdit, ControlError> {
        if !value.is_finite() {
            return Err(ControlError::NonFinite);
        }
        self.edit(field, value, true)
    }

    /// Slider range for a field, in display units.
    pub fn range(&self, field: ControlField) -> Result<SliderRange, ControlError> {
        match field {
            ControlField::Position(axis) => Ok(self.layout.position[axis as usize]),
            ControlField::Rotation(_) => Ok(self.layout.rotation_deg),
            ControlField::Scale => Ok(self.layout.scale),
            ControlField::Sensitivity => self
                .layout
                .sensitivity
                .ok_or(ControlError::Unsupported(field)),
        }
    }

    /// Current value of a field formatted at panel precision.
    #[must_use]
    pub fn display(&self, field: ControlField, model: &TransformModel) -> String {
        match field {
            ControlField::Position(axis) => {
                format!("{:.*}", self.layout.position_decimals, axis.get(model.position))
            }
            ControlField::Rotation(axis) => format!(
                "{:.*}",
                self.layout.rotation_decimals,
                axis.get(model.rotation).to_degrees()
            ),
            ControlField::Scale => {
                format!("{:.*}", self.layout.scale_decimals, model.scale)
            }
            ControlField::Sensitivity => format!("{:.1}", model.sensitivity),
        }
    }

    fn edit(
        &self,
        field: ControlField,
        value: f32,
        snap: bool,
    ) -> Result<ControlEdit, ControlError> {
        let range = self.range(field)?;
        let value = if snap { range.snap(value) } else { value };
        let value = match field {
            ControlField::Rotation(_) => value.to_radians(),
            _ => value,
        };
        ControlEdit::new(field, value)
    }
}
