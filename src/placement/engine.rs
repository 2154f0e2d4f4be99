use crate::config::types::PlacementConfig;
use crate::model::board::Board;
use crate::model::component::LayerSide;
use crate::model::ids::ComponentId;
use crate::model::pt::Pt;
use crate::model::rt::Rt;
use crate::model::sz::Sz;
use crate::netlist::Netlist;
use crate::placement::error::{PlacementError, PlacementFailureReason};
use crate::placement::groups::{group_of, Group};
use crate::placement::zones::{grid_candidates, ZoneKind, Zones};
use crate::registry::data::footprint_size;

/// The four orthogonal rotations, in preference order: 0/180 before 90/270,
/// per the placement engine's "prefer orthogonal rotation" rule.
const ROTATION_PREFERENCE: [f64; 4] = [0.0, 180.0, 90.0, 270.0];

fn bbox_for(size: Sz, rotation_deg: f64, center: Pt) -> Rt {
    let (w, h) = if rotation_deg == 90.0 || rotation_deg == 270.0 { (size.h, size.w) } else { (size.w, size.h) };
    Rt::centered(center, w, h)
}

fn overlaps_any(bbox: Rt, placed: &[Rt], spacing_mm: f64) -> bool {
    placed.iter().any(|p| bbox.inset(-spacing_mm / 2.0, -spacing_mm / 2.0).intersects(&p.inset(-spacing_mm / 2.0, -spacing_mm / 2.0)))
}

fn within_board(bbox: Rt, board_rect: Rt, edge_clearance_mm: f64) -> bool {
    board_rect.inset(edge_clearance_mm, edge_clearance_mm).contains_rt(&bbox)
}

fn nearby_count(center: Pt, placed: &[Pt], radius_mm: f64) -> usize {
    placed.iter().filter(|&&p| p.dist(center) <= radius_mm).count()
}

/// Assigns a position, rotation, and layer side to every component in
/// `netlist`, mutating it in place. Deterministic for a given input: groups
/// are processed in priority order, components within a group by reference
/// designator, and candidate positions in grid row-major order.
pub struct PlacementEngine<'a> {
    config: &'a PlacementConfig,
    min_component_spacing_mm: f64,
}

impl<'a> PlacementEngine<'a> {
    pub fn new(config: &'a PlacementConfig) -> Self {
        Self { config, min_component_spacing_mm: 0.5 }
    }

    pub fn place(&self, netlist: &mut Netlist, board: &Board) -> Result<(), PlacementError> {
        let engine = PlacementEngine { config: self.config, min_component_spacing_mm: board.design_rules.min_component_spacing_mm };
        engine.place_inner(netlist, board)
    }

    fn place_inner(&self, netlist: &mut Netlist, board: &Board) -> Result<(), PlacementError> {
        let board_rect = Rt::new(0.0, 0.0, board.width_mm, board.height_mm);
        let zones = Zones::compute(board_rect, self.config.margin_percentage);
        let board_dim = board.width_mm.max(board.height_mm);

        let mut placed_boxes: Vec<Rt> = Vec::new();
        let mut placed_centers: Vec<Pt> = Vec::new();
        let mut opamp_positions: Vec<Pt> = Vec::new();
        let mut placed_ids = std::collections::HashSet::new();
        let mut placed_index: std::collections::HashMap<ComponentId, usize> = std::collections::HashMap::new();

        self.place_stability_components(netlist, board_rect, &mut placed_boxes, &mut placed_centers, &mut placed_ids);

        let mut front_panel_offset_mm = 0.0_f64;

        let mut order: Vec<ComponentId> = netlist.components().iter().map(|c| c.id).collect();
        order.sort_by_key(|&id| {
            let c = netlist.component(id).unwrap();
            let group = group_of(&c.kind);
            (group.priority(), c.reference.prefix, c.reference.index)
        });

        for id in order {
            if placed_ids.contains(&id) {
                continue;
            }
            let component = netlist.component(id).unwrap();
            let group = group_of(&component.kind);
            let size = footprint_size(&component.footprint_id);
            let is_front_panel = board.preset.front_panel_pitch().is_some()
                && matches!(
                    component.kind,
                    crate::model::component::Kind::Jack(_)
                        | crate::model::component::Kind::Potentiometer
                        | crate::model::component::Kind::Switch
                        | crate::model::component::Kind::Led
                );

            let placement = if is_front_panel {
                self.place_on_front_panel(
                    board,
                    board_rect,
                    size,
                    &mut front_panel_offset_mm,
                    &placed_boxes,
                    &placed_centers,
                    group,
                )
            } else {
                self.place_in_zone(group, &zones, board_rect, board_dim, size, &placed_boxes, &placed_centers)
            };

            let Some((center, rotation_deg)) = placement else {
                return Err(PlacementError::Infeasible { component_id: id, reason: PlacementFailureReason::NoZoneCandidate });
            };

            let bbox = bbox_for(size, rotation_deg, center);
            placed_boxes.push(bbox);
            placed_centers.push(center);
            placed_index.insert(id, placed_boxes.len() - 1);
            placed_ids.insert(id);
            if matches!(component.kind, crate::model::component::Kind::Opamp(_)) {
                opamp_positions.push(center);
            }

            let component = netlist.component_mut(id).unwrap();
            component.position = Some(center);
            component.rotation_deg = rotation_deg;
            component.layer_side = LayerSide::Top;
        }

        let _ = opamp_positions;
        self.place_decoupling_capacitors(netlist, board_rect, &mut placed_boxes, &mut placed_centers, &placed_index);
        Ok(())
    }

    /// A capacitor wired to an active IC's power pin is re-seated against
    /// that pin's actual position, rather than the IC's centroid the
    /// general zone-based pass aimed for, so the decoupling-distance check
    /// in validation has a realistic chance of being satisfied. Runs after
    /// every component has an initial position; leaves a capacitor where it
    /// was if no closer non-overlapping spot exists.
    fn place_decoupling_capacitors(
        &self,
        netlist: &mut Netlist,
        board_rect: Rt,
        placed_boxes: &mut [Rt],
        placed_centers: &mut [Pt],
        placed_index: &std::collections::HashMap<ComponentId, usize>,
    ) {
        use crate::model::component::Kind;

        let decoupling_distance = self.config.decoupling_cap_distance_mm;
        let spacing_mm = self.min_component_spacing_mm;

        let mut targets: Vec<(ComponentId, Pt)> = Vec::new();
        for net in netlist.nets() {
            let power_pin_pos = net.endpoints.iter().find_map(|e| {
                let c = netlist.component(e.component)?;
                if !crate::validation::rules::power::active_ic_kinds(&c.kind) {
                    return None;
                }
                let pin = c.pins.values().find(|p| p.name == e.pin || p.number.to_string() == e.pin)?;
                if !crate::validation::rules::power::is_power_pin_name(&pin.name) {
                    return None;
                }
                Some(c.position?.offset(pin.p.x, pin.p.y))
            });
            let Some(target) = power_pin_pos else { continue };
            let capacitor = net.endpoints.iter().find_map(|e| {
                let c = netlist.component(e.component)?;
                matches!(c.kind, Kind::Capacitor(_)).then_some(c.id)
            });
            if let Some(cap_id) = capacitor {
                targets.push((cap_id, target));
            }
        }

        for (cap_id, target) in targets {
            let Some(&idx) = placed_index.get(&cap_id) else { continue };
            if placed_centers[idx].dist(target) <= decoupling_distance {
                continue;
            }
            let size = footprint_size(&netlist.component(cap_id).unwrap().footprint_id);
            let others: Vec<Rt> = placed_boxes.iter().enumerate().filter(|&(i, _)| i != idx).map(|(_, &b)| b).collect();

            let step = spacing_mm.max(0.25);
            let radius = (decoupling_distance * 4.0).max(size.w.max(size.h));
            let mut candidates: Vec<Pt> = Vec::new();
            let mut y = target.y - radius;
            while y <= target.y + radius {
                let mut x = target.x - radius;
                while x <= target.x + radius {
                    candidates.push(Pt::new(x, y));
                    x += step;
                }
                y += step;
            }
            candidates.sort_by(|a, b| a.dist(target).partial_cmp(&b.dist(target)).unwrap_or(std::cmp::Ordering::Equal));

            for candidate in candidates {
                let bbox = bbox_for(size, 0.0, candidate);
                if !within_board(bbox, board_rect, 0.0) || overlaps_any(bbox, &others, spacing_mm) {
                    continue;
                }
                placed_boxes[idx] = bbox;
                placed_centers[idx] = candidate;
                if let Some(c) = netlist.component_mut(cap_id) {
                    c.position = Some(candidate);
                    c.rotation_deg = 0.0;
                }
                break;
            }
        }
    }

    fn place_stability_components(
        &self,
        netlist: &mut Netlist,
        board_rect: Rt,
        placed_boxes: &mut Vec<Rt>,
        placed_centers: &mut Vec<Pt>,
        placed_ids: &mut std::collections::HashSet<ComponentId>,
    ) {
        for stability in &self.config.stability_components {
            let Some(component) = netlist.components().iter().find(|c| c.reference.to_string() == stability.reference) else {
                continue;
            };
            let id = component.id;
            let size = footprint_size(&component.footprint_id);
            let center = Pt::new(
                board_rect.l() + board_rect.w() * stability.x_percentage,
                board_rect.b() + board_rect.h() * stability.y_percentage,
            );
            let bbox = bbox_for(size, 0.0, center);
            placed_boxes.push(bbox);
            placed_centers.push(center);
            placed_ids.insert(id);
            let component = netlist.component_mut(id).unwrap();
            component.position = Some(center);
            component.rotation_deg = 0.0;
            component.layer_side = LayerSide::Top;
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn place_on_front_panel(
        &self,
        board: &Board,
        board_rect: Rt,
        size: Sz,
        offset_mm: &mut f64,
        placed_boxes: &[Rt],
        placed_centers: &[Pt],
        group: Group,
    ) -> Option<(Pt, f64)> {
        let pitch = board.preset.front_panel_pitch()?;
        let step = pitch.jack_mm.max(pitch.potentiometer_mm).max(pitch.led_mm).max(size.w);
        let y = board_rect.b() + size.h / 2.0 + self.config.margin_percentage * board_rect.h();
        let mut x = board_rect.l() + size.w / 2.0 + *offset_mm;
        for _ in 0..64 {
            let center = Pt::new(x, y);
            let bbox = bbox_for(size, 0.0, center);
            if within_board(bbox, board_rect, self.config.margin_percentage * board_rect.h() / 2.0)
                && !overlaps_any(bbox, placed_boxes, group.spacing_percentage() * board_rect.w())
            {
                *offset_mm = x - board_rect.l() + step;
                return Some((center, 0.0));
            }
            x += step;
        }
        let _ = placed_centers;
        None
    }

    fn place_in_zone(
        &self,
        group: Group,
        zones: &Zones,
        board_rect: Rt,
        board_dim: f64,
        size: Sz,
        placed_boxes: &[Rt],
        placed_centers: &[Pt],
    ) -> Option<(Pt, f64)> {
        let zone_kind = group.zone_kind();
        let candidate_rects: Vec<Rt> = match zone_kind {
            ZoneKind::NearOpamps if !placed_centers.is_empty() => {
                let radius = self.config.center_spacing_percentage * board_dim;
                zones.near_opamps(placed_centers, radius).iter().map(|c| c.bounds()).collect()
            }
            ZoneKind::NearOpamps => vec![zones.center],
            other => vec![zones.rect_for(other)],
        };

        let spacing_mm = self.min_component_spacing_mm;
        let density_radius = self.config.max_component_density_radius_mm;
        let max_nearby = self.config.max_nearby_components as usize;

        for rect in candidate_rects {
            for candidate in grid_candidates(rect, board_dim, self.config.grid_spacing_percentage) {
                for &rotation in &ROTATION_PREFERENCE {
                    let bbox = bbox_for(size, rotation, candidate);
                    if !within_board(bbox, board_rect, 0.0) {
                        continue;
                    }
                    if overlaps_any(bbox, placed_boxes, spacing_mm) {
                        continue;
                    }
                    if group.thermal_consideration() && nearby_count(candidate, placed_centers, density_radius) > max_nearby {
                        continue;
                    }
                    return Some((candidate, rotation));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::PlacementConfig;
    use crate::model::board::{two_layer_stack, Board, BoardPreset};
    use crate::model::component::Kind;
    use crate::netlist::Netlist;
    use crate::registry::Registry;

    #[test]
    fn places_simple_circuit_without_overlap() {
        let registry = Registry::new();
        let mut netlist = Netlist::new();
        let r1 = netlist.add_component(&registry, Kind::Resistor, "10k", None).unwrap();
        let j1 = netlist
            .add_component(&registry, Kind::Jack(crate::model::component::JackVariant::Mm35), "", None)
            .unwrap();
        let board = Board::new(BoardPreset::Pedal, two_layer_stack());
        let config = PlacementConfig::default();
        let engine = PlacementEngine::new(&config);
        engine.place(&mut netlist, &board).unwrap();
        assert!(netlist.component(r1).unwrap().position.is_some());
        assert!(netlist.component(j1).unwrap().position.is_some());
    }

    #[test]
    fn decoupling_capacitor_lands_within_distance_of_its_ic_power_pin() {
        let registry = Registry::new();
        let mut netlist = Netlist::new();
        let u1 = netlist.add_component(&registry, Kind::Opamp(crate::model::component::OpampVariant::Dual), "TL072", None).unwrap();
        let c1 = netlist
            .add_component(&registry, Kind::Capacitor(crate::model::component::CapacitorVariant::Ceramic), "100nF", None)
            .unwrap();
        let vcc = netlist.add_net("VCC", Some(crate::model::net::SignalClass::Power)).unwrap();
        netlist.connect(vcc, u1, "8").unwrap();
        netlist.connect(vcc, c1, "1").unwrap();

        let board = Board::new(BoardPreset::Pedal, two_layer_stack());
        let config = PlacementConfig::default();
        let engine = PlacementEngine::new(&config);
        engine.place(&mut netlist, &board).unwrap();

        let u1_pos = netlist.component(u1).unwrap().position.unwrap();
        let pin8_offset = netlist.component(u1).unwrap().pins.get(&8).unwrap().p;
        let pin8_pos = u1_pos.offset(pin8_offset.x, pin8_offset.y);
        let c1_pos = netlist.component(c1).unwrap().position.unwrap();
        assert!(c1_pos.dist(pin8_pos) <= config.decoupling_cap_distance_mm + 1e-6, "cap landed {:.2}mm from its pin", c1_pos.dist(pin8_pos));
    }

    #[test]
    fn infeasible_when_board_cannot_hold_the_fleet() {
        let registry = Registry::new();
        let mut netlist = Netlist::new();
        for _ in 0..60 {
            netlist
                .add_component(&registry, Kind::Opamp(crate::model::component::OpampVariant::Quad), "TL074", None)
                .unwrap();
        }
        let board = Board::new(BoardPreset::Pedal, two_layer_stack());
        let config = PlacementConfig::default();
        let engine = PlacementEngine::new(&config);
        assert!(engine.place(&mut netlist, &board).is_err());
    }
}
