#![no_std]
#![no_main]

#[cfg(test)]
#[embedded_test::tests]
mod tests {
    use embedded_sdmmc::ShortFileName;
    use press_marker::{MARKER_FILE, MARKER_PAYLOAD, debounce::DebounceGate};

    /// Tick values below are plain numbers; the gate only compares and
    /// adds them, so the unit is whatever the caller feeds in.
    const PERIOD: u64 = 2_000;

    #[init]
    fn init() {
        rtt_target::rtt_init_defmt!();
        let _peripherals = esp_hal::init(esp_hal::Config::default());
    }

    #[test]
    fn first_edge_is_accepted() {
        let mut gate = DebounceGate::new(PERIOD);
        assert!(gate.accept(0));

        // Regardless of how late after boot it lands
        let mut gate = DebounceGate::new(PERIOD);
        assert!(gate.accept(123_456));
    }

    #[test]
    fn acceptance_sequence() {
        let triggers = [0, 1_000, 2_500, 2_600, 5_000];
        let expected = [true, false, true, false, true];

        let mut gate = DebounceGate::new(PERIOD);
        for (t, want) in triggers.into_iter().zip(expected) {
            assert_eq!(gate.accept(t), want, "trigger at {}", t);
        }
    }

    #[test]
    fn edge_on_the_deadline_is_rejected() {
        let mut gate = DebounceGate::new(PERIOD);
        assert!(gate.accept(0));
        // The window closes at 2000 inclusive
        assert!(!gate.accept(PERIOD));

        let mut gate = DebounceGate::new(PERIOD);
        assert!(gate.accept(0));
        assert!(gate.accept(PERIOD + 1));
    }

    #[test]
    fn hammering_faster_than_the_period_never_reopens() {
        // Rejected edges still push the window, so sustained chatter
        // after the first press is suppressed for as long as it lasts.
        let mut gate = DebounceGate::new(PERIOD);
        let mut accepted = 0;
        for i in 0..100 {
            if gate.accept(i * 500) {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 1);
    }

    #[test]
    fn accepted_edges_are_more_than_a_period_apart() {
        // Mixed cadence: bursts of chatter between slow distinct presses
        let mut gate = DebounceGate::new(PERIOD);
        let mut last_accepted: Option<u64> = None;
        let mut t = 0;
        for step in [1, 30, 700, 2_001, 5, 2_500, 100, 9_000, 1, 1, 3_000] {
            t += step;
            if gate.accept(t) {
                if let Some(prev) = last_accepted {
                    assert!(t - prev > PERIOD, "accepted {} and {}", prev, t);
                }
                last_accepted = Some(t);
            }
        }
        assert!(last_accepted.is_some());
    }

    #[test]
    fn marker_constants_are_writable() {
        // The filename must be a valid FAT short name, and the payload
        // must fit the single-sector write the logger relies on.
        assert!(ShortFileName::create_from_str(MARKER_FILE).is_ok());
        assert!(!MARKER_PAYLOAD.is_empty());
        assert!(MARKER_PAYLOAD.len() <= 512);
    }
}
