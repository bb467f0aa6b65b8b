//! # Wave Settings
//!
//! Tagged parameter store shared between the control panel and the engine.
//! The panel writes values with [`WaveSettings::set`], which clamps scalars to
//! their registered range and queues the tag as a pending change. The engine
//! drains pending tags once per frame with [`WaveSettings::take_signal`] and
//! pushes the new values wherever they are needed.

use std::collections::{HashMap, VecDeque};
use std::f32::consts::PI;

use crate::gfx::scene::Color;

pub const WATER_COLOR: &str = "waterColor";
pub const HARMONIC_AMPLITUDE: &str = "harmonicAmplitude";
pub const HARMONIC_WAVE_LENGTH: &str = "harmonicWaveLength";
pub const WAVE_SHARPNESS: &str = "waveSharpness";
pub const HARMONIC_SPEED: &str = "harmonicSpeed";
pub const HARMONIC_DIRECTION_ANGLE: &str = "harmonicDirectionAngle";

/// Scalar tags the procedural shader reads, in upload order.
pub const WAVE_SCALARS: [&str; 5] = [
    HARMONIC_AMPLITUDE,
    HARMONIC_WAVE_LENGTH,
    WAVE_SHARPNESS,
    HARMONIC_SPEED,
    HARMONIC_DIRECTION_ANGLE,
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingValue {
    Scalar(f32),
    Color(Color),
}

impl SettingValue {
    fn kind(&self) -> &'static str {
        match self {
            SettingValue::Scalar(_) => "scalar",
            SettingValue::Color(_) => "color",
        }
    }
}

/// Inclusive bounds for a scalar setting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarRange {
    pub min: f32,
    pub max: f32,
}

impl ScalarRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("unknown setting '{0}'")]
    UnknownTag(String),
    #[error("setting '{tag}' holds a {expected} value, got a {found}")]
    KindMismatch {
        tag: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("invalid range {min}..={max} for setting '{tag}'")]
    InvalidRange { tag: String, min: f32, max: f32 },
}

pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    value: SettingValue,
    range: Option<ScalarRange>,
}

#[derive(Debug, Clone, Default)]
pub struct WaveSettings {
    items: HashMap<String, Entry>,
    pending: VecDeque<String>,
}

impl WaveSettings {
    /// An empty store. See [`WaveSettings::with_defaults`] for the water room
    /// parameters.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut settings = Self::new();
        let defaults = [
            (WATER_COLOR, SettingValue::Color([0.1, 0.15, 0.4]), None),
            (HARMONIC_AMPLITUDE, SettingValue::Scalar(4.0), Some((0.0, 10.0))),
            (HARMONIC_WAVE_LENGTH, SettingValue::Scalar(65.0), Some((15.0, 300.0))),
            (WAVE_SHARPNESS, SettingValue::Scalar(3.0), Some((1.0, 20.0))),
            (HARMONIC_SPEED, SettingValue::Scalar(5.0), Some((0.0, 20.0))),
            (HARMONIC_DIRECTION_ANGLE, SettingValue::Scalar(PI / 2.0), Some((0.0, 2.0 * PI))),
        ];
        for (tag, value, range) in defaults {
            let range = range.map(|(min, max)| ScalarRange::new(min, max));
            // Built-in ranges are well formed
            if let Err(err) = settings.register(tag, value, range) {
                log::warn!("skipping default setting: {}", err);
            }
        }
        settings
    }

    /// Adds or replaces a setting. Does not raise a signal.
    pub fn register(
        &mut self,
        tag: impl Into<String>,
        value: SettingValue,
        range: Option<ScalarRange>,
    ) -> Result<()> {
        let tag = tag.into();
        if let Some(r) = range {
            if !(r.min <= r.max) {
                return Err(SettingsError::InvalidRange {
                    tag,
                    min: r.min,
                    max: r.max,
                });
            }
        }
        let value = match (value, range) {
            (SettingValue::Scalar(v), Some(r)) => SettingValue::Scalar(r.clamp(v)),
            _ => value,
        };
        log::debug!("registered setting '{}' = {:?}", tag, value);
        self.items.insert(tag, Entry { value, range });
        Ok(())
    }

    /// Stores a new value and queues `tag` as changed. Scalars are clamped to
    /// the registered range; the stored value is returned.
    pub fn set(&mut self, tag: &str, value: SettingValue) -> Result<SettingValue> {
        let entry = self
            .items
            .get_mut(tag)
            .ok_or_else(|| SettingsError::UnknownTag(tag.to_string()))?;

        let value = match (entry.value, value) {
            (SettingValue::Scalar(_), SettingValue::Scalar(v)) => {
                SettingValue::Scalar(entry.range.map_or(v, |r| r.clamp(v)))
            }
            (SettingValue::Color(_), SettingValue::Color(c)) => SettingValue::Color(c),
            (current, new) => {
                return Err(SettingsError::KindMismatch {
                    tag: tag.to_string(),
                    expected: current.kind(),
                    found: new.kind(),
                })
            }
        };
        entry.value = value;
        self.signal(tag)?;
        Ok(value)
    }

    pub fn get(&self, tag: &str) -> Result<SettingValue> {
        self.items
            .get(tag)
            .map(|e| e.value)
            .ok_or_else(|| SettingsError::UnknownTag(tag.to_string()))
    }

    pub fn scalar(&self, tag: &str) -> Result<f32> {
        match self.get(tag)? {
            SettingValue::Scalar(v) => Ok(v),
            other => Err(SettingsError::KindMismatch {
                tag: tag.to_string(),
                expected: "scalar",
                found: other.kind(),
            }),
        }
    }

    pub fn color(&self, tag: &str) -> Result<Color> {
        match self.get(tag)? {
            SettingValue::Color(c) => Ok(c),
            other => Err(SettingsError::KindMismatch {
                tag: tag.to_string(),
                expected: "color",
                found: other.kind(),
            }),
        }
    }

    pub fn range(&self, tag: &str) -> Option<ScalarRange> {
        self.items.get(tag).and_then(|e| e.range)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.items.contains_key(tag)
    }

    /// Queues `tag` as changed. A tag already waiting is not queued twice.
    pub fn signal(&mut self, tag: &str) -> Result<()> {
        if !self.items.contains_key(tag) {
            return Err(SettingsError::UnknownTag(tag.to_string()));
        }
        if !self.pending.iter().any(|t| t == tag) {
            self.pending.push_back(tag.to_string());
        }
        Ok(())
    }

    /// Oldest pending change, if any.
    pub fn take_signal(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Current wave parameters packed for the procedural shader.
    pub fn wave_uniform(&self, time: f32) -> Result<WaveUniform> {
        let [r, g, b] = self.color(WATER_COLOR)?;
        Ok(WaveUniform {
            water_color: [r, g, b, 1.0],
            amplitude: self.scalar(HARMONIC_AMPLITUDE)?,
            wave_length: self.scalar(HARMONIC_WAVE_LENGTH)?,
            sharpness: self.scalar(WAVE_SHARPNESS)?,
            speed: self.scalar(HARMONIC_SPEED)?,
            direction_angle: self.scalar(HARMONIC_DIRECTION_ANGLE)?,
            time,
            _padding: [0.0; 2],
        })
    }
}

/// Procedural wave shader inputs.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WaveUniform {
    pub water_color: [f32; 4],
    pub amplitude: f32,
    pub wave_length: f32,
    pub sharpness: f32,
    pub speed: f32,
    pub direction_angle: f32,
    /// Scene time in seconds.
    pub time: f32,
    pub _padding: [f32; 2],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = WaveSettings::with_defaults();
        assert_eq!(settings.color(WATER_COLOR).unwrap(), [0.1, 0.15, 0.4]);
        assert_eq!(settings.scalar(HARMONIC_AMPLITUDE).unwrap(), 4.0);
        assert_eq!(settings.scalar(HARMONIC_WAVE_LENGTH).unwrap(), 65.0);
        assert_eq!(settings.scalar(WAVE_SHARPNESS).unwrap(), 3.0);
        assert_eq!(settings.scalar(HARMONIC_SPEED).unwrap(), 5.0);
        assert_eq!(settings.scalar(HARMONIC_DIRECTION_ANGLE).unwrap(), PI / 2.0);
        assert_eq!(
            settings.range(HARMONIC_WAVE_LENGTH),
            Some(ScalarRange::new(15.0, 300.0))
        );
        assert!(settings.range(WATER_COLOR).is_none());
        assert!(!settings.has_pending());
    }

    #[test]
    fn test_set_clamps_to_range() {
        let mut settings = WaveSettings::with_defaults();
        let stored = settings
            .set(HARMONIC_AMPLITUDE, SettingValue::Scalar(25.0))
            .unwrap();
        assert_eq!(stored, SettingValue::Scalar(10.0));
        settings
            .set(HARMONIC_WAVE_LENGTH, SettingValue::Scalar(1.0))
            .unwrap();
        assert_eq!(settings.scalar(HARMONIC_WAVE_LENGTH).unwrap(), 15.0);
    }

    #[test]
    fn test_errors() {
        let mut settings = WaveSettings::with_defaults();
        assert_eq!(
            settings.set("foamDensity", SettingValue::Scalar(1.0)),
            Err(SettingsError::UnknownTag("foamDensity".to_string()))
        );
        assert!(matches!(
            settings.set(WATER_COLOR, SettingValue::Scalar(1.0)),
            Err(SettingsError::KindMismatch { .. })
        ));
        assert!(matches!(
            settings.scalar(WATER_COLOR),
            Err(SettingsError::KindMismatch { .. })
        ));
        assert!(matches!(
            settings.register("bad", SettingValue::Scalar(0.0), Some(ScalarRange::new(2.0, 1.0))),
            Err(SettingsError::InvalidRange { .. })
        ));
        // A failed set queues nothing
        assert!(!settings.has_pending());
    }

    #[test]
    fn test_signals_are_queued_once() {
        let mut settings = WaveSettings::with_defaults();
        settings.set(HARMONIC_SPEED, SettingValue::Scalar(2.0)).unwrap();
        settings
            .set(WATER_COLOR, SettingValue::Color([0.0, 0.5, 1.0]))
            .unwrap();
        settings.set(HARMONIC_SPEED, SettingValue::Scalar(3.0)).unwrap();

        assert_eq!(settings.take_signal().as_deref(), Some(HARMONIC_SPEED));
        assert_eq!(settings.take_signal().as_deref(), Some(WATER_COLOR));
        assert_eq!(settings.take_signal(), None);
    }

    #[test]
    fn test_wave_uniform() {
        let settings = WaveSettings::with_defaults();
        let uniform = settings.wave_uniform(1.5).unwrap();
        assert_eq!(uniform.water_color, [0.1, 0.15, 0.4, 1.0]);
        assert_eq!(uniform.amplitude, 4.0);
        assert_eq!(uniform.time, 1.5);
        assert_eq!(std::mem::size_of::<WaveUniform>(), 48);

        assert!(WaveSettings::new().wave_uniform(0.0).is_err());
    }
}
