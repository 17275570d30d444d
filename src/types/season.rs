//! Defines the `Season` enum used as a categorical feature column.

/// Climatic season of the deployment site, keyed on the calendar month.
///
/// The numeric codes are what ends up in the `Season` output column.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Season {
    /// Code 1: December through February.
    CoolDry = 1,
    /// Code 2: March through May.
    HotDry = 2,
    /// Code 3: June through November.
    Rainy = 3,
}

impl Season {
    /// Season for an integer month (1-12). Months outside that range fall in
    /// `Rainy`, like every month not listed in the other two seasons.
    pub fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::CoolDry,
            3..=5 => Season::HotDry,
            _ => Season::Rainy,
        }
    }

    /// Season for a month-of-year value with a quarter fraction (e.g. `12.75`).
    /// Only the integer month counts.
    pub fn from_month_of_year(month_of_year: f64) -> Self {
        Self::from_month(month_of_year.trunc() as u32)
    }

    pub fn code(self) -> u32 {
        self as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_from_month_of_year() {
        assert_eq!(Season::from_month_of_year(12.75), Season::CoolDry);
        assert_eq!(Season::from_month_of_year(1.00), Season::CoolDry);
        assert_eq!(
            Season::from_month_of_year(12.75).code(),
            Season::from_month_of_year(1.00).code()
        );
        assert_eq!(Season::from_month_of_year(6.00).code(), 3);
        assert_eq!(Season::from_month_of_year(5.75), Season::HotDry);
    }

    #[test]
    fn test_season_covers_every_month() {
        let codes: Vec<u32> = (1..=12).map(|m| Season::from_month(m).code()).collect();
        assert_eq!(codes, vec![1, 1, 2, 2, 2, 3, 3, 3, 3, 3, 3, 1]);
    }
}
