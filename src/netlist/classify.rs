use crate::model::net::SignalClass;

const POWER_PREFIXES: &[&str] = &["VCC", "VDD", "VSS", "V+", "V-", "+12V", "-12V", "+5V"];
const GROUND_PREFIXES: &[&str] = &["GND", "AGND", "DGND"];
const HIGH_SPEED_PREFIXES: &[&str] = &["CLK", "DDR", "USB", "HDMI"];

/// Heuristic net classification, used when no explicit class is supplied.
/// `touches_audio_pin` is true if the net connects to any audio-kind pin.
pub fn classify(net_name: &str, touches_audio_pin: bool) -> SignalClass {
    let upper = net_name.to_uppercase();
    if POWER_PREFIXES.iter().any(|p| upper.starts_with(p)) {
        return SignalClass::Power;
    }
    if GROUND_PREFIXES.iter().any(|p| upper.starts_with(p)) {
        return SignalClass::Ground;
    }
    if HIGH_SPEED_PREFIXES.iter().any(|p| upper.starts_with(p)) {
        return SignalClass::HighSpeed;
    }
    if touches_audio_pin {
        return SignalClass::Audio;
    }
    SignalClass::Control
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vcc_prefixed_name_classifies_as_power() {
        assert_eq!(classify("VCC_5V", false), SignalClass::Power);
    }

    #[test]
    fn gnd_prefixed_name_classifies_as_ground() {
        assert_eq!(classify("AGND", false), SignalClass::Ground);
    }

    #[test]
    fn unclassified_name_touching_audio_pin_is_audio() {
        assert_eq!(classify("N1", true), SignalClass::Audio);
    }

    #[test]
    fn unclassified_name_defaults_to_control() {
        assert_eq!(classify("N2", false), SignalClass::Control);
    }

    #[test]
    fn clk_prefixed_name_is_high_speed() {
        assert_eq!(classify("CLK_48M", false), SignalClass::HighSpeed);
    }
}
