use serde::{Deserialize, Serialize};

/// Link thickness rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowWidthSettings {
    pub use_custom: bool,
    pub custom: f64,
    pub min: f64,
    pub max: f64,
    pub multiplier: f64,
}

/// Stroke width of a link carrying `value`.
///
/// Fixed `custom` width when enabled, otherwise
/// `(value / max_link_value × max + min) × multiplier`.
#[must_use]
pub fn calculate_flow_width(value: f64, max_link_value: f64, settings: FlowWidthSettings) -> f64 {
    if settings.use_custom {
        return settings.custom;
    }
    let normalized = value / max_link_value;
    (normalized * settings.max + settings.min) * settings.multiplier
}

#[cfg(test)]
mod tests {
    use super::*;

    const DYNAMIC: FlowWidthSettings = FlowWidthSettings {
        use_custom: false,
        custom: 10.0,
        min: 4.0,
        max: 20.0,
        multiplier: 1.0,
    };

    #[test]
    fn dynamic_width_scales_with_value() {
        assert_eq!(calculate_flow_width(200_000.0, 400_000.0, DYNAMIC), 14.0);
        assert_eq!(calculate_flow_width(400_000.0, 400_000.0, DYNAMIC), 24.0);
    }

    #[test]
    fn custom_width_ignores_value() {
        let settings = FlowWidthSettings {
            use_custom: true,
            ..DYNAMIC
        };
        assert_eq!(calculate_flow_width(1.0, 400_000.0, settings), 10.0);
    }

    #[test]
    fn multiplier_scales_result() {
        let settings = FlowWidthSettings {
            multiplier: 2.0,
            ..DYNAMIC
        };
        assert_eq!(calculate_flow_width(200_000.0, 400_000.0, settings), 28.0);
    }
}
