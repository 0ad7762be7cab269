use crate::aspects::types::{
    Aspect, AspectSettings, AspectType, CROSS_CHART_ORB_MULTIPLIER, SAME_CHART_ORB_MULTIPLIER,
};
use crate::ephemeris::types::{Body, BodyPosition};
use crate::geometry;

/// Aspect calculator
#[derive(Debug, Clone, Default)]
pub struct AspectCalculator {
    settings: AspectSettings,
}

impl AspectCalculator {
    /// Create a calculator with the default orb policy
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: AspectSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AspectSettings {
        &self.settings
    }

    /// Aspects between every unordered pair within one chart.
    ///
    /// The faster body of a pair is taken to be the one approaching.
    pub fn detect_aspects(&self, bodies: &[BodyPosition]) -> Vec<Aspect> {
        let mut aspects = Vec::new();

        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                if let Some((aspect_type, angle, orb)) =
                    self.match_aspect(a, b, SAME_CHART_ORB_MULTIPLIER)
                {
                    aspects.push(Aspect {
                        body_a: a.body,
                        body_b: b.body,
                        aspect_type,
                        angle,
                        orb,
                        applying: a.speed > b.speed,
                    });
                }
            }
        }

        aspects
    }

    /// Aspects between two charts (synastry, transits, progressions).
    ///
    /// The same body in both charts is a valid pair. Orbs are halved and no
    /// aspect is ever marked applying.
    pub fn detect_cross_aspects(
        &self,
        bodies_a: &[BodyPosition],
        bodies_b: &[BodyPosition],
    ) -> Vec<Aspect> {
        let mut aspects = Vec::new();

        for a in bodies_a {
            for b in bodies_b {
                if let Some((aspect_type, angle, orb)) =
                    self.match_aspect(a, b, CROSS_CHART_ORB_MULTIPLIER)
                {
                    aspects.push(Aspect {
                        body_a: a.body,
                        body_b: b.body,
                        aspect_type,
                        angle,
                        orb,
                        applying: false,
                    });
                }
            }
        }

        aspects
    }

    /// First aspect type, in canonical order, whose window holds the pair
    pub fn calculate_aspect(
        &self,
        body_a: Body,
        lon_a: f64,
        body_b: Body,
        lon_b: f64,
        multiplier: f64,
    ) -> Option<(AspectType, f64)> {
        let distance = geometry::distance(lon_a, lon_b);
        AspectType::CANONICAL
            .into_iter()
            .filter(|t| self.settings.is_enabled(*t))
            .find_map(|aspect_type| {
                let orb = (distance - aspect_type.exact_angle()).abs();
                let max_orb = self.settings.max_orb(aspect_type, body_a, body_b, multiplier);
                (orb <= max_orb).then_some((aspect_type, orb))
            })
    }

    fn match_aspect(
        &self,
        a: &BodyPosition,
        b: &BodyPosition,
        multiplier: f64,
    ) -> Option<(AspectType, f64, f64)> {
        self.calculate_aspect(a.body, a.longitude, b.body, b.longitude, multiplier)
            .map(|(aspect_type, orb)| (aspect_type, aspect_type.exact_angle(), orb))
    }
}
