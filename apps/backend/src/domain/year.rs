//! Secret-year drawing and the clock that bounds it.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use time::OffsetDateTime;

/// Year the first card set was printed; lower bound for secret years.
pub const FIRST_CARD_SET_YEAR: i32 = 1993;

/// Source of the current calendar year.
pub trait Clock: Send + Sync {
    fn current_year(&self) -> i32;
}

/// Wall clock in UTC.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i32 {
        OffsetDateTime::now_utc().year()
    }
}

/// Draws secret years uniformly from `[first_year, current_year]`, never
/// returning the card's own release year.
pub struct SecretYearDrawer {
    first_year: i32,
    rng: Mutex<StdRng>,
}

impl SecretYearDrawer {
    /// `seed` makes the sequence reproducible; `None` seeds from the OS.
    pub fn new(first_year: i32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            first_year,
            rng: Mutex::new(rng),
        }
    }

    pub fn first_year(&self) -> i32 {
        self.first_year
    }

    /// Draw a year distinct from `card_year`.
    ///
    /// Returns `None` only when the range holds a single year and that year
    /// is `card_year`. A clock behind `first_year` collapses the range to
    /// `first_year`.
    pub fn draw(&self, card_year: i32, current_year: i32) -> Option<i32> {
        let lo = self.first_year;
        let hi = current_year.max(lo);
        let excluded = (lo..=hi).contains(&card_year);
        let top = if excluded { hi - 1 } else { hi };
        if top < lo {
            return None;
        }

        // Draw over the range minus one slot, then step past the excluded year.
        let mut year = self.rng.lock().random_range(lo..=top);
        if excluded && year >= card_year {
            year += 1;
        }
        Some(year)
    }
}
