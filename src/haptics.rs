use crate::types::Haptic;

impl Haptic {
    /// Vibration pattern in milliseconds, alternating pulse/pause.
    pub fn pattern(self) -> &'static [u64] {
        match self {
            Haptic::Light => &[10],
            Haptic::Medium => &[25],
            Haptic::Heavy => &[50],
            Haptic::Selection => &[5],
            Haptic::Success => &[10, 50, 10],
            Haptic::Warning => &[25, 50, 25],
            Haptic::Error => &[50, 25, 50, 25, 50],
        }
    }
}

/// Best-effort tactile feedback. `trigger` is fire-and-forget: it never
/// blocks and never fails the caller; hosts without a vibration surface use
/// [`NoopHaptics`].
pub trait HapticDriver {
    fn trigger(&self, haptic: Haptic);

    fn is_supported(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHaptics;

impl HapticDriver for NoopHaptics {
    fn trigger(&self, _haptic: Haptic) {}

    fn is_supported(&self) -> bool {
        false
    }
}
