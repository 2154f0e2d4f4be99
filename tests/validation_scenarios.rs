//! Exercises the validation engine directly against hand-built board
//! snapshots, covering the crosstalk and high-precision frequency-response
//! scenarios that are awkward to force through the full routing pass.
use audiopcb::config::Config;
use audiopcb::model::board::{two_layer_stack, Board, BoardPreset};
use audiopcb::model::ids::LayerId;
use audiopcb::model::net::SignalClass;
use audiopcb::model::pt::Pt;
use audiopcb::model::track::Track;
use audiopcb::netlist::Netlist;
use audiopcb::validation::{BoardView, Category, Severity, ValidationEngine};

#[test]
fn parallel_audio_nets_on_the_same_layer_trigger_a_crosstalk_error() {
    let mut netlist = Netlist::new();
    let net_a = netlist.add_net("IN_A", Some(SignalClass::Audio)).unwrap();
    let net_b = netlist.add_net("IN_B", Some(SignalClass::Audio)).unwrap();

    let mut board = Board::new(BoardPreset::Pedal, two_layer_stack());
    board.tracks.push(Track::new(net_a, LayerId(0), vec![Pt::new(10.0, 10.0), Pt::new(30.0, 10.0)], 0.3));
    board.tracks.push(Track::new(net_b, LayerId(0), vec![Pt::new(10.0, 10.05), Pt::new(30.0, 10.05)], 0.3));

    let config = Config::default();
    let view = BoardView::new(&board, &netlist, &[], &config);
    let report = ValidationEngine::new().run(&view, 0);

    assert!(!report.is_valid);
    let crosstalk_issue = report
        .issues
        .iter()
        .find(|i| i.category == Category::SignalIntegrity && i.documentation_ref.as_deref() == Some("validation.signal-integrity.crosstalk"))
        .expect("expected a crosstalk issue naming both nets");
    assert!(crosstalk_issue.severity >= Severity::Warning);
    assert!(crosstalk_issue.affected_nets.contains(&"IN_A".to_string()));
    assert!(crosstalk_issue.affected_nets.contains(&"IN_B".to_string()));

    // Moving IN_B to the opposite layer is the remediation the pipeline
    // driver applies for a same-layer crosstalk finding; re-running
    // validation against the remediated layout clears the issue.
    board.tracks[1] = Track::new(net_b, LayerId(1), vec![Pt::new(10.0, 10.05), Pt::new(30.0, 10.05)], 0.3);
    let view = BoardView::new(&board, &netlist, &[], &config);
    let report = ValidationEngine::new().run(&view, 0);
    assert!(!report.issues.iter().any(|i| i.documentation_ref.as_deref() == Some("validation.signal-integrity.crosstalk")));
}

#[test]
fn crosstalk_at_the_audio_class_minimum_spacing_reaches_error_severity() {
    // The spec's worked crosstalk scenario: two audio nets routed parallel
    // for 15mm at the audio class's legal 0.3mm minimum clearance, not an
    // under-clearance layout. Even at the minimum legal spacing this must
    // score high enough to land at error severity, since that's what drives
    // the pipeline driver's rip-and-reroute remediation.
    let mut netlist = Netlist::new();
    let net_a = netlist.add_net("IN_A", Some(SignalClass::Audio)).unwrap();
    let net_b = netlist.add_net("IN_B", Some(SignalClass::Audio)).unwrap();

    let mut board = Board::new(BoardPreset::Pedal, two_layer_stack());
    board.tracks.push(Track::new(net_a, LayerId(0), vec![Pt::new(10.0, 10.0), Pt::new(25.0, 10.0)], 0.3));
    board.tracks.push(Track::new(net_b, LayerId(0), vec![Pt::new(10.0, 10.3), Pt::new(25.0, 10.3)], 0.3));

    let config = Config::default();
    let view = BoardView::new(&board, &netlist, &[], &config);
    let report = ValidationEngine::new().run(&view, 0);

    let crosstalk_issue = report
        .issues
        .iter()
        .find(|i| i.documentation_ref.as_deref() == Some("validation.signal-integrity.crosstalk"))
        .expect("expected a crosstalk issue even at the legal minimum clearance");
    assert_eq!(crosstalk_issue.severity, Severity::Error);
}

#[test]
fn extended_bandwidth_analysis_flags_a_long_thin_audio_trace() {
    let mut netlist = Netlist::new();
    let net = netlist.add_net("OUT", Some(SignalClass::Audio)).unwrap();

    let mut board = Board::new(BoardPreset::Desktop, two_layer_stack());
    // A long trace whose parasitic inductance pushes its estimated
    // reactance past the passband tolerance once the analysis window is
    // extended to 80kHz and the flatness tolerance is tightened to the
    // near-ruler-flat response this rig is checking for.
    let long_path: Vec<Pt> = (0..=300).map(|i| Pt::new(i as f64, 0.0)).collect();
    board.tracks.push(Track::new(net, LayerId(0), long_path, 0.3));

    let mut config = Config::default();
    config.validation.extended_bandwidth_analysis = true;
    config.validation.max_frequency_hz = 80_000.0;
    config.validation.frequency_tolerance_db = 0.001;

    let view = BoardView::new(&board, &netlist, &[], &config);
    let report = ValidationEngine::new().run(&view, 0);

    let frequency_issue = report
        .issues
        .iter()
        .find(|i| i.documentation_ref.as_deref() == Some("validation.audio.frequency-response"))
        .expect("expected a frequency-response issue under the extended analysis window");
    assert_eq!(frequency_issue.severity, Severity::Warning);
    assert!(frequency_issue.suggestion.is_some());
}
