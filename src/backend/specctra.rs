//! A Specctra-session-file-shaped text emitter: nested parenthesized
//! s-expressions, one top-level `(session ...)` form wrapping `placement`,
//! `wiring`, and `zones` blocks, in the style of the DSN session format this
//! pack's router corpus already parses on the way in.
use std::fmt::Write as _;

use crate::backend::{BackendError, BoardBackend};
use crate::model::component::Component;
use crate::model::track::Track;
use crate::model::via::Via;
use crate::model::zone::Zone;

/// Accumulates s-expression fragments in board order, then joins them into
/// one `(session ...)` document on `persist`. Holds no file handle until
/// persisted, so a run can be discarded without touching the filesystem.
#[derive(Debug, Default)]
pub struct SpecctraSessionBackend {
    session_name: String,
    placement: Vec<String>,
    wiring: Vec<String>,
    zones: Vec<String>,
}

impl SpecctraSessionBackend {
    pub fn new(session_name: impl Into<String>) -> Self {
        Self { session_name: session_name.into(), placement: Vec::new(), wiring: Vec::new(), zones: Vec::new() }
    }

    fn document(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "(session \"{}\"", self.session_name);
        let _ = writeln!(out, "  (placement");
        for line in &self.placement {
            let _ = writeln!(out, "    {line}");
        }
        let _ = writeln!(out, "  )");
        let _ = writeln!(out, "  (wiring");
        for line in &self.wiring {
            let _ = writeln!(out, "    {line}");
        }
        let _ = writeln!(out, "  )");
        let _ = writeln!(out, "  (zones");
        for line in &self.zones {
            let _ = writeln!(out, "    {line}");
        }
        let _ = writeln!(out, "  )");
        out.push_str(")\n");
        out
    }
}

impl BoardBackend for SpecctraSessionBackend {
    fn place_footprint(&mut self, component: &Component) {
        let (x, y) = component.position.map(|p| (p.x, p.y)).unwrap_or((0.0, 0.0));
        self.placement.push(format!(
            "(component \"{}\" (place {} {} {} {})) ; {}",
            component.footprint_id, component.reference, x, y, component.rotation_deg, component.kind.name()
        ));
    }

    fn create_track(&mut self, track: &Track) {
        let pts: Vec<String> = track.pts.iter().map(|p| format!("{} {}", p.x, p.y)).collect();
        self.wiring.push(format!(
            "(wire (path {} {} {})) ; {}",
            track.layer, track.width_mm, pts.join(" "), track.net
        ));
    }

    fn create_via(&mut self, via: &Via) {
        self.wiring.push(format!(
            "(via (at {} {}) (drill {}) (diameter {}) (layers {} {})) ; {}",
            via.p.x, via.p.y, via.drill_mm, via.outer_diameter_mm, via.from_layer, via.to_layer, via.net
        ));
    }

    fn create_zone(&mut self, zone: &Zone) {
        let pts: Vec<String> = zone.outline.pts.iter().map(|p| format!("{} {}", p.x, p.y)).collect();
        self.zones.push(format!("(zone (layer {}) (clearance {}) (polygon {})) ; {}", zone.layer, zone.clearance_mm, pts.join(" "), zone.net));
    }

    fn persist(&mut self, path: &std::path::Path) -> Result<(), BackendError> {
        std::fs::write(path, self.document()).map_err(|source| BackendError::Persist { path: path.display().to_string(), source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::component::{Component, Kind, LayerSide};
    use crate::model::ids::{ComponentId, LayerId, ReferenceDesignator};
    use crate::model::pt::Pt;
    use crate::model::via::Via;

    fn sample_component() -> Component {
        Component {
            id: ComponentId(0),
            kind: Kind::Resistor,
            value: "10k".into(),
            package: None,
            footprint_id: "r0603".into(),
            pins: Default::default(),
            reference: ReferenceDesignator::new("R", 1),
            position: Some(Pt::new(10.0, 20.0)),
            rotation_deg: 0.0,
            layer_side: LayerSide::Top,
        }
    }

    #[test]
    fn emitted_document_wraps_every_section() {
        let mut backend = SpecctraSessionBackend::new("test-board");
        backend.place_footprint(&sample_component());
        backend.create_via(&Via::new(crate::model::ids::NetId(0), Pt::new(5.0, 5.0), 0.3, 0.6, LayerId(0), LayerId(1)));
        let doc = backend.document();
        assert!(doc.starts_with("(session \"test-board\""));
        assert!(doc.contains("(placement"));
        assert!(doc.contains("(wiring"));
        assert!(doc.contains("(zones"));
        assert!(doc.contains("r0603"));
    }
}
