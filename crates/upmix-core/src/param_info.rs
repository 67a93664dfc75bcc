//! Parameter metadata for the surround controls.
//!
//! A [`ParamDescriptor`] names one tunable value and gives its unit, range,
//! default and a stable [`ParamId`]. Parameter sets implement
//! [`ParameterInfo`] so preset loaders and the command line can walk them by
//! index without knowing the concrete struct.
//!
//! ```rust
//! use upmix_core::{ParamDescriptor, ParamId, ParameterInfo};
//!
//! struct Width {
//!     degrees: f32,
//! }
//!
//! const WRAP: ParamDescriptor =
//!     ParamDescriptor::degrees("Circular Wrap", "Wrap", 0.0, 360.0, 90.0)
//!         .with_id(ParamId(4), "circular_wrap");
//!
//! impl ParameterInfo for Width {
//!     fn param_count(&self) -> usize { 1 }
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         (index == 0).then_some(WRAP)
//!     }
//!     fn get_param(&self, index: usize) -> f32 {
//!         if index == 0 { self.degrees } else { 0.0 }
//!     }
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if index == 0 {
//!             self.degrees = WRAP.clamp(value);
//!         }
//!     }
//! }
//!
//! let mut width = Width { degrees: 90.0 };
//! width.set_param(0, 720.0);
//! assert_eq!(width.get_param(0), 360.0);
//! assert_eq!(width.find_param_by_name("wrap"), Some(0));
//! ```

/// Persistent parameter number. Never reused once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// How a parameter value is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Angle in degrees.
    Degrees,
    /// Cutoff frequency.
    Hertz,
    /// Gain factor.
    Multiplier,
    /// Plain number, switch or list index.
    None,
}

impl ParamUnit {
    /// Text appended after a formatted value.
    ///
    /// ```rust
    /// use upmix_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Hertz.suffix(), " Hz");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(self) -> &'static str {
        match self {
            ParamUnit::Degrees => " deg",
            ParamUnit::Hertz => " Hz",
            ParamUnit::Multiplier => "x",
            ParamUnit::None => "",
        }
    }
}

/// Static description of one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Display name.
    pub name: &'static str,
    /// Compact name for tables, at most 8 characters.
    pub short_name: &'static str,
    /// Display unit.
    pub unit: ParamUnit,
    /// Lowest accepted value.
    pub min: f32,
    /// Highest accepted value.
    pub max: f32,
    /// Value of a fresh parameter set.
    pub default: f32,
    /// Only whole values are meaningful (switches and lists).
    pub stepped: bool,
    /// `ParamId(0)` until [`with_id`](Self::with_id) assigns one.
    pub id: ParamId,
    /// snake_case key used by TOML presets.
    pub string_id: &'static str,
}

impl ParamDescriptor {
    const fn ranged(
        name: &'static str,
        short_name: &'static str,
        unit: ParamUnit,
        range: (f32, f32),
        default: f32,
        stepped: bool,
    ) -> Self {
        Self {
            name,
            short_name,
            unit,
            min: range.0,
            max: range.1,
            default,
            stepped,
            id: ParamId(0),
            string_id: "",
        }
    }

    /// Angle in degrees.
    pub const fn degrees(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::ranged(name, short_name, ParamUnit::Degrees, (min, max), default, false)
    }

    /// Unitless continuous control.
    pub const fn amount(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::ranged(name, short_name, ParamUnit::None, (min, max), default, false)
    }

    /// Gain factor shown as `1.00x`.
    pub const fn multiplier(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::ranged(name, short_name, ParamUnit::Multiplier, (min, max), default, false)
    }

    /// Frequency in Hz.
    pub const fn frequency_hz(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::ranged(name, short_name, ParamUnit::Hertz, (min, max), default, false)
    }

    /// Switch stored as `0.0` or `1.0`.
    pub const fn toggle(name: &'static str, short_name: &'static str, on: bool) -> Self {
        let default = if on { 1.0 } else { 0.0 };
        Self::ranged(name, short_name, ParamUnit::None, (0.0, 1.0), default, true)
    }

    /// Index into a list of `count` entries.
    pub const fn choice(
        name: &'static str,
        short_name: &'static str,
        count: usize,
        default: usize,
    ) -> Self {
        let last = count.saturating_sub(1) as f32;
        Self::ranged(name, short_name, ParamUnit::None, (0.0, last), default as f32, true)
    }

    /// Assigns the persistent identifiers.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Limits `value` to `min..=max`. NaN becomes the default.
    ///
    /// ```rust
    /// use upmix_core::ParamDescriptor;
    ///
    /// let bass = ParamDescriptor::frequency_hz("Bass Low Cutoff", "BassLo", 0.0, 150.0, 40.0);
    /// assert_eq!(bass.clamp(500.0), 150.0);
    /// assert_eq!(bass.clamp(f32::NAN), 40.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default;
        }
        value.max(self.min).min(self.max)
    }
}

/// A set of parameters addressed by position.
///
/// `set_param` clamps through the descriptor. Unknown indices read as `0.0`
/// and ignore writes.
pub trait ParameterInfo {
    /// Number of parameters.
    fn param_count(&self) -> usize;

    /// Descriptor at `index`.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value at `index`.
    fn get_param(&self, index: usize) -> f32;

    /// Stores `value` at `index` after clamping.
    fn set_param(&mut self, index: usize, value: f32);

    /// Index of the parameter whose name, short name or string ID equals
    /// `name`, ignoring ASCII case.
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|d| {
                [d.name, d.short_name, d.string_id]
                    .iter()
                    .any(|n| n.eq_ignore_ascii_case(name))
            })
        })
    }

    /// Persistent ID of the parameter at `index`.
    fn param_id(&self, index: usize) -> Option<ParamId> {
        self.param_info(index).map(|d| d.id)
    }
}
