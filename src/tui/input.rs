// Key debouncing for action keys
//
// Every terminal auto-repeats a held key and some never send release
// events. The gate decides whether a press is a new intent or repeat
// noise: action keys fire once per press, list navigation repeats while
// held.

use crossterm::event::KeyCode;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// How a held key is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Fires once per press
    Once,
    /// Fires on press, then every `every` once held for `after`
    Held { after: Duration, every: Duration },
}

const LIST_REPEAT: Repeat = Repeat::Held {
    after: Duration::from_millis(500),
    every: Duration::from_millis(50),
};

const ERASE_REPEAT: Repeat = Repeat::Held {
    after: Duration::from_millis(300),
    every: Duration::from_millis(30),
};

/// Quiet gap after which a `Once` key counts as pressed again even though
/// no release arrived. Auto-repeat runs well under this.
const RETRIGGER_GAP: Duration = Duration::from_millis(150);

impl Repeat {
    pub fn for_key(key: KeyCode) -> Self {
        match key {
            KeyCode::Up
            | KeyCode::Down
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Char('j')
            | KeyCode::Char('k') => LIST_REPEAT,
            KeyCode::Backspace => ERASE_REPEAT,
            // Enter among them: a held Enter must not request a code and
            // then verify it straight away
            _ => Repeat::Once,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct HeldKey {
    since: Instant,
    fired: Instant,
    seen: Instant,
}

/// Press bookkeeping for every key currently believed to be down
#[derive(Debug, Default)]
pub struct KeyGate {
    held: HashMap<KeyCode, HeldKey>,
}

impl KeyGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this press should run the key's action
    pub fn press(&mut self, key: KeyCode) -> bool {
        self.press_at(key, Instant::now())
    }

    fn press_at(&mut self, key: KeyCode, now: Instant) -> bool {
        let Some(held) = self.held.get_mut(&key) else {
            self.held.insert(
                key,
                HeldKey {
                    since: now,
                    fired: now,
                    seen: now,
                },
            );
            return true;
        };

        let fire = match Repeat::for_key(key) {
            Repeat::Once => now.duration_since(held.seen) >= RETRIGGER_GAP,
            Repeat::Held { after, every } => {
                now.duration_since(held.since) >= after && now.duration_since(held.fired) >= every
            }
        };
        held.seen = now;
        if fire {
            held.fired = now;
        }
        fire
    }

    pub fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    /// Forget all held keys (screen change, terminal focus loss)
    pub fn reset(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn action_key_fires_once_through_auto_repeat() {
        let mut gate = KeyGate::new();
        let t0 = Instant::now();

        assert!(gate.press_at(KeyCode::Enter, t0));
        // 30 ms auto-repeat for a full second never retriggers
        for step in 1..=33 {
            assert!(!gate.press_at(KeyCode::Enter, t0 + ms(30 * step)));
        }

        gate.release(KeyCode::Enter);
        assert!(gate.press_at(KeyCode::Enter, t0 + ms(1000)));
    }

    #[test]
    fn action_key_retriggers_after_a_pause_without_release() {
        let mut gate = KeyGate::new();
        let t0 = Instant::now();

        assert!(gate.press_at(KeyCode::Char('s'), t0));
        assert!(!gate.press_at(KeyCode::Char('s'), t0 + ms(100)));
        assert!(gate.press_at(KeyCode::Char('s'), t0 + ms(400)));
    }

    #[test]
    fn navigation_repeats_after_delay() {
        let mut gate = KeyGate::new();
        let t0 = Instant::now();

        assert!(gate.press_at(KeyCode::Down, t0));
        assert!(!gate.press_at(KeyCode::Down, t0 + ms(100)));
        assert!(gate.press_at(KeyCode::Down, t0 + ms(500)));
        assert!(!gate.press_at(KeyCode::Down, t0 + ms(520)));
        assert!(gate.press_at(KeyCode::Down, t0 + ms(550)));
    }

    #[test]
    fn keys_are_tracked_independently() {
        let mut gate = KeyGate::new();
        let t0 = Instant::now();

        assert!(gate.press_at(KeyCode::Tab, t0));
        assert!(gate.press_at(KeyCode::Enter, t0 + ms(10)));
        assert!(!gate.press_at(KeyCode::Tab, t0 + ms(20)));
    }

    #[test]
    fn reset_forgets_held_keys() {
        let mut gate = KeyGate::new();

        assert!(gate.press(KeyCode::Char('s')));
        assert!(!gate.press(KeyCode::Char('s')));

        gate.reset();
        assert!(gate.press(KeyCode::Char('s')));
    }
}
