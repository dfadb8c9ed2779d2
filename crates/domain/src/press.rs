use chrono::{DateTime, Duration, Utc};

/// How long a chip has to be held before its delete button appears.
pub const DEFAULT_HOLD: Duration = Duration::milliseconds(600);

/// Press-and-hold detection for revealing a delete affordance.
///
/// A press arms a deadline. Releasing or leaving before the deadline disarms it, a tick at
/// or after the deadline reveals the affordance, which then stays until it is dismissed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Press {
    #[default]
    Idle,
    Pending {
        reveal_at: DateTime<Utc>,
    },
    Revealed,
}

impl Press {
    pub fn press(&mut self, now: DateTime<Utc>, hold: Duration) {
        match self {
            Press::Idle | Press::Pending { .. } => {
                *self = Press::Pending {
                    reveal_at: now + hold,
                };
            }
            Press::Revealed => {}
        }
    }

    pub fn release(&mut self) {
        if let Press::Pending { .. } = self {
            *self = Press::Idle;
        }
    }

    pub fn leave(&mut self) {
        self.release();
    }

    /// Returns true if this tick revealed the affordance.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        match *self {
            Press::Pending { reveal_at } if now >= reveal_at => {
                *self = Press::Revealed;
                true
            }
            Press::Idle | Press::Pending { .. } | Press::Revealed => false,
        }
    }

    pub fn dismiss(&mut self) {
        *self = Press::Idle;
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        *self == Press::Revealed
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        *self == Press::Idle
    }
}
