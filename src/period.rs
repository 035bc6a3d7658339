/// A goal period. Each one owns a tab, a goal input and a running total of focus hours.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Period {
    Week,
    Month,
    Year,
}

impl Period {
    /// Tab order.
    pub const ALL: [Period; 3] = [Period::Week, Period::Month, Period::Year];

    pub fn key(self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Period::Week => "Past 7 Days",
            Period::Month => "Past Month",
            Period::Year => "Past Year",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Period::Week => 0,
            Period::Month => 1,
            Period::Year => 2,
        }
    }
}

/// One value per period, addressed by `Period` rather than by name.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PerPeriod<T> {
    values: [T; 3],
}

impl<T> PerPeriod<T> {
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Period) -> T,
    {
        Self {
            values: Period::ALL.map(&mut f),
        }
    }

    pub fn get(&self, period: Period) -> &T {
        &self.values[period.index()]
    }

    pub fn get_mut(&mut self, period: Period) -> &mut T {
        &mut self.values[period.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_tab_order() {
        let titles: Vec<_> = Period::ALL.iter().map(|p| p.title()).collect();
        assert_eq!(titles, ["Past 7 Days", "Past Month", "Past Year"]);
        for (idx, period) in Period::ALL.iter().enumerate() {
            assert_eq!(period.index(), idx);
        }
    }

    #[test]
    fn per_period_addresses_each_slot() {
        let mut map = PerPeriod::from_fn(|p| p.key().len());
        assert_eq!(*map.get(Period::Week), 4);
        assert_eq!(*map.get(Period::Month), 5);
        assert_eq!(*map.get(Period::Year), 4);
        *map.get_mut(Period::Year) = 42;
        assert_eq!(*map.get(Period::Year), 42);
        assert_eq!(*map.get(Period::Week), 4);
    }
}
