// Golf vocabulary used by the form: playing frequency and club categories.

use std::fmt;

// ---------------------------------------------------------------------------
// Frequency
// ---------------------------------------------------------------------------

/// How many rounds the golfer plays per month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Frequency {
    LessThanOnce,
    #[default]
    OneToTwo,
    ThreeToFour,
    FiveToEight,
    MoreThanEight,
}

impl Frequency {
    /// Every variant in form order.
    pub const ALL: [Frequency; 5] = [
        Frequency::LessThanOnce,
        Frequency::OneToTwo,
        Frequency::ThreeToFour,
        Frequency::FiveToEight,
        Frequency::MoreThanEight,
    ];

    /// Phrase interpolated into "I play {label} per month".
    pub fn label(self) -> &'static str {
        match self {
            Frequency::LessThanOnce => "less than once",
            Frequency::OneToTwo => "1-2 times",
            Frequency::ThreeToFour => "3-4 times",
            Frequency::FiveToEight => "5-8 times",
            Frequency::MoreThanEight => "more than 8 times",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Club
// ---------------------------------------------------------------------------

/// Club categories offered by the best/worst club selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Club {
    Driver,
    FairwayWood,
    Hybrid,
    LongIrons,
    MidIrons,
    ShortIrons,
    Wedges,
    Putter,
}

impl Club {
    /// Every variant in form order.
    pub const ALL: [Club; 8] = [
        Club::Driver,
        Club::FairwayWood,
        Club::Hybrid,
        Club::LongIrons,
        Club::MidIrons,
        Club::ShortIrons,
        Club::Wedges,
        Club::Putter,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Club::Driver => "Driver",
            Club::FairwayWood => "Fairway Wood",
            Club::Hybrid => "Hybrid",
            Club::LongIrons => "Long Irons (3-5)",
            Club::MidIrons => "Mid Irons (6-7)",
            Club::ShortIrons => "Short Irons (8-9)",
            Club::Wedges => "Wedges",
            Club::Putter => "Putter",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

impl fmt::Display for Club {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Step `offset` places forward through `all`, wrapping at the end.
fn cycle<T: Copy + PartialEq>(all: &[T], current: T, offset: usize) -> T {
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    all[(idx + offset) % all.len()]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
