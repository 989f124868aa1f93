use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WatchlistEntry {
    pub symbol: String,
    pub name: String,
}

/// Ticker symbols and display names shown in the selectors and sidebar.
/// Fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watchlist {
    entries: Vec<WatchlistEntry>,
}

const DEFAULT_ENTRIES: [(&str, &str); 13] = [
    ("AAPL", "Apple Inc."),
    ("GOOGL", "Alphabet Inc."),
    ("MSFT", "Microsoft Corporation"),
    ("AMZN", "Amazon.com Inc."),
    ("TSLA", "Tesla Inc."),
    ("NFLX", "Netflix Inc."),
    ("NVDA", "NVIDIA Corporation"),
    ("META", "Meta Platforms, Inc."),
    ("BABA", "Alibaba Group Holding Ltd."),
    ("ADBE", "Adobe Inc."),
    ("INTC", "Intel Corporation"),
    ("RELIANCE.NS", "Reliance Industries Limited"),
    ("TCS.NS", "Tata Consultancy Services"),
];

impl Default for Watchlist {
    fn default() -> Self {
        Self {
            entries: DEFAULT_ENTRIES
                .iter()
                .map(|(symbol, name)| WatchlistEntry {
                    symbol: symbol.to_string(),
                    name: name.to_string(),
                })
                .collect(),
        }
    }
}

impl Watchlist {
    /// Builds a watchlist from configured entries, upper-casing symbols and
    /// dropping blanks and duplicates. Falls back to the built-in table when
    /// nothing usable remains.
    pub fn from_entries(entries: Vec<WatchlistEntry>) -> Self {
        let mut out: Vec<WatchlistEntry> = Vec::with_capacity(entries.len());
        for entry in entries {
            let symbol = entry.symbol.trim().to_ascii_uppercase();
            if symbol.is_empty() || out.iter().any(|e| e.symbol == symbol) {
                continue;
            }
            let name = if entry.name.trim().is_empty() {
                symbol.clone()
            } else {
                entry.name.trim().to_string()
            };
            out.push(WatchlistEntry { symbol, name });
        }
        if out.is_empty() {
            return Self::default();
        }
        Self { entries: out }
    }

    pub fn entries(&self) -> &[WatchlistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.position(symbol).is_some()
    }

    pub fn position(&self, symbol: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.symbol.eq_ignore_ascii_case(symbol))
    }

    /// Display name for `symbol`, or the symbol itself when unknown.
    pub fn display_name<'a>(&'a self, symbol: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|e| e.symbol.eq_ignore_ascii_case(symbol))
            .map(|e| e.name.as_str())
            .unwrap_or(symbol)
    }

    /// Symbol `step` places away from `current`, wrapping in both directions.
    pub fn step_symbol(&self, current: &str, step: isize) -> String {
        if self.entries.is_empty() {
            return current.to_string();
        }
        let len = self.entries.len() as isize;
        let idx = self.position(current).unwrap_or(0) as isize;
        let next = (idx + step).rem_euclid(len) as usize;
        self.entries[next].symbol.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_thirteen_entries() {
        let wl = Watchlist::default();
        assert_eq!(wl.len(), 13);
        assert_eq!(wl.display_name("AAPL"), "Apple Inc.");
        assert_eq!(wl.display_name("tcs.ns"), "Tata Consultancy Services");
        assert_eq!(wl.display_name("ZZZ"), "ZZZ");
    }

    #[test]
    fn from_entries_dedups_and_normalizes() {
        let wl = Watchlist::from_entries(vec![
            WatchlistEntry {
                symbol: " msft ".to_string(),
                name: "Microsoft".to_string(),
            },
            WatchlistEntry {
                symbol: "MSFT".to_string(),
                name: "dup".to_string(),
            },
            WatchlistEntry {
                symbol: "  ".to_string(),
                name: "blank".to_string(),
            },
            WatchlistEntry {
                symbol: "ibm".to_string(),
                name: String::new(),
            },
        ]);
        assert_eq!(wl.len(), 2);
        assert_eq!(wl.entries()[0].symbol, "MSFT");
        assert_eq!(wl.display_name("IBM"), "IBM");
    }

    #[test]
    fn from_entries_falls_back_to_default() {
        assert_eq!(Watchlist::from_entries(Vec::new()), Watchlist::default());
    }

    #[test]
    fn step_symbol_wraps() {
        let wl = Watchlist::default();
        assert_eq!(wl.step_symbol("AAPL", 1), "GOOGL");
        assert_eq!(wl.step_symbol("AAPL", -1), "TCS.NS");
        assert_eq!(wl.step_symbol("TCS.NS", 1), "AAPL");
    }
}
