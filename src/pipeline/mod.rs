//! The pipeline driver: advances a loaded netlist through placement,
//! routing, zone synthesis, and validation, then refines the board against
//! its own validation report until it converges or exhausts its budget.
pub mod error;
pub mod remediation;

use crate::config::types::Config;
use crate::model::board::{Board, BoardPreset, Layer};
use crate::model::ids::NetId;
use crate::model::pt::Pt;
use crate::netlist::Netlist;
use crate::placement::PlacementEngine;
use crate::pipeline::remediation::RemediationAction;
pub use crate::pipeline::error::PipelineError;
use crate::registry::Registry;
use crate::routing::error::RoutingError;
use crate::routing::router::Router;
use crate::routing::rules::RoutingRule;
use crate::validation::{BoardView, ValidationEngine, ValidationReport};
use crate::zonesynth::ZoneSynth;

/// A single distance nudge applied to a density-crowded component between
/// refinement iterations, in millimetres.
const NUDGE_STEP_MM: f64 = 2.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Empty,
    NetlistLoaded,
    Placed,
    Routed,
    Zoned,
    Validated,
    Finalized,
    Failed,
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PipelineState::Empty => "empty",
            PipelineState::NetlistLoaded => "netlist-loaded",
            PipelineState::Placed => "placed",
            PipelineState::Routed => "routed",
            PipelineState::Zoned => "zoned",
            PipelineState::Validated => "validated",
            PipelineState::Finalized => "finalized",
            PipelineState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// The explicit handle threaded through the driver in place of a mutable
/// process-wide registry or a global logger: immutable after construction,
/// borrowed by every stage that needs it.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub registry: &'a Registry,
    pub config: &'a Config,
}

impl<'a> Context<'a> {
    pub fn new(registry: &'a Registry, config: &'a Config) -> Self {
        Self { registry, config }
    }
}

/// The terminal result of a driver run: the board as of its last completed
/// pass, the netlist it was built from, the final report, and the state the
/// driver ended in (`Finalized` or `Failed`).
pub struct PipelineOutcome {
    pub board: Board,
    pub netlist: Netlist,
    pub report: ValidationReport,
    pub state: PipelineState,
}

/// Drives one board from a loaded netlist through to a finalized or failed
/// outcome. Owns the board and netlist for the duration of the run; nothing
/// outside this struct holds a mutable handle to either while it runs.
pub struct PipelineDriver<'a> {
    ctx: Context<'a>,
    state: PipelineState,
}

impl<'a> PipelineDriver<'a> {
    pub fn new(ctx: Context<'a>) -> Self {
        Self { ctx, state: PipelineState::Empty }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Runs a netlist through the full pipeline on a fresh board of `preset`
    /// with the given `layers`, to a `Finalized` or `Failed` outcome.
    /// `timestamp` is stamped onto every validation report by the caller, not
    /// read from the system clock here, so identical input yields a
    /// byte-identical report on every run.
    pub fn run(&mut self, netlist: Netlist, preset: BoardPreset, layers: Vec<Layer>, timestamp: u64) -> Result<PipelineOutcome, PipelineError> {
        self.state = PipelineState::NetlistLoaded;
        log::info!("pipeline: netlist loaded with {} component(s), {} net(s)", netlist.components().len(), netlist.nets().len());

        let mut board = Board::new(preset, layers);
        board.design_rules.edge_clearance_mm = self.ctx.config.design_rules.edge_clearance_mm;
        board.design_rules.min_component_spacing_mm = self.ctx.config.design_rules.min_component_spacing_mm;
        board.design_rules.min_zone_clearance_mm = self.ctx.config.design_rules.min_zone_clearance_mm;

        let mut netlist = netlist;
        if let Err(e) = PlacementEngine::new(&self.ctx.config.placement).place(&mut netlist, &board) {
            self.state = PipelineState::Failed;
            return Err(e.into());
        }
        board.components = netlist.components().to_vec();
        self.state = PipelineState::Placed;
        log::debug!("pipeline: placement complete");

        let mut routing_config = self.ctx.config.routing.clone();
        let mut zone_clearance_mm = self.ctx.config.design_rules.min_zone_clearance_mm;
        let budget = self.ctx.config.refinement.refinement_budget;

        for iteration in 0..=budget {
            let router = Router::new(&routing_config);
            let routed = router.route(&netlist, &board);
            board.tracks = routed.tracks.clone();
            board.vias = routed.vias.clone();
            self.state = PipelineState::Routed;

            let zone_synth = ZoneSynth::new(&self.ctx.config.zones, routing_config.grid_resolution_mm);
            board.zones = zone_synth.synthesize(&netlist, &board, &routed, board.design_rules.edge_clearance_mm, zone_clearance_mm)?;
            self.state = PipelineState::Zoned;

            let unrouted: Vec<NetId> = routed.failed.iter().map(|RoutingError::RoutingInfeasible { net_id }| *net_id).collect();
            let view = BoardView::new(&board, &netlist, &unrouted, self.ctx.config);
            let report = ValidationEngine::new().run(&view, timestamp);
            self.state = PipelineState::Validated;
            log::info!("pipeline: refinement iteration {iteration} found {} issue(s), valid={}", report.issues.len(), report.is_valid);

            if report.is_valid {
                self.state = PipelineState::Finalized;
                return Ok(PipelineOutcome { board, netlist, report, state: self.state });
            }

            if iteration == budget {
                self.state = PipelineState::Failed;
                let report = report.with_exhausted(true);
                return Ok(PipelineOutcome { board, netlist, report, state: self.state });
            }

            self.apply_remediation(&mut netlist, &mut board, &mut routing_config, &mut zone_clearance_mm, &report.issues);
            board.components = netlist.components().to_vec();
        }
        unreachable!("loop always returns by the budget-exhaustion branch above")
    }

    /// Applies one refinement iteration's worth of corrective actions, in the
    /// fixed priority order `remediation::plan` already sorted them into.
    /// Nudging a component returns the driver to `Placed`; every other
    /// action only widens the next routing/zone pass.
    fn apply_remediation(
        &mut self,
        netlist: &mut Netlist,
        board: &mut Board,
        routing_config: &mut crate::config::types::RoutingConfig,
        zone_clearance_mm: &mut f64,
        issues: &[crate::validation::Issue],
    ) {
        let actions = remediation::plan(issues, netlist);
        for action in actions {
            match action {
                RemediationAction::RerouteNet { .. } => {
                    routing_config.max_reroute_attempts += 1;
                }
                RemediationAction::RerouteWithExtraHalo { .. } => {
                    *zone_clearance_mm = (*zone_clearance_mm + 0.1).min(board.design_rules.min_zone_clearance_mm * 3.0);
                    routing_config.max_reroute_attempts += 1;
                }
                RemediationAction::NudgeComponent { component_id } => {
                    if let Some(component) = netlist.component_mut(component_id) {
                        if let Some(p) = component.position {
                            component.position = Some(Pt::new(p.x + NUDGE_STEP_MM, p.y));
                        }
                    }
                    self.state = PipelineState::Placed;
                }
                RemediationAction::WidenSearchBudget => {
                    routing_config.max_reroute_attempts += 1;
                }
            }
        }
    }
}

/// Per-class routing rule lookup re-exported for callers building their own
/// `BoardBackend` payloads from a finalized outcome without re-importing the
/// routing module directly.
pub fn routing_rule_for(class: crate::model::net::SignalClass) -> RoutingRule {
    crate::routing::rules::rule_for(class)
}
