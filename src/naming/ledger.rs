//! Per-procedure name ledger
//!
//! The ledger is the single source of truth for uniqueness. It maps every name
//! stem (a name with its trailing digits removed) to the highest numeric suffix
//! already handed out for it. A count of 0 means only the bare stem is in use
//! through [`NameLedger::allocate`]; counts only ever grow.
//!
//! Suffixes too large for 32 bits do not split, so such names sit under their
//! own stem. The exact set of taken names catches the collisions this allows.

use std::collections::{HashMap, HashSet};

/// First letter offered to loop counters
pub const FIRST_LOOP_LETTER: char = 'i';
/// Last letter offered to loop counters
pub const LAST_LOOP_LETTER: char = 'n';

/// Split `name` into its stem and numeric suffix
///
/// A maximal run of trailing ASCII digits that parses as an integer becomes the
/// suffix. Otherwise the whole name is the stem and the suffix is 1.
pub fn split_name(name: &str) -> (&str, i64) {
    let stem_len = name.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if stem_len < name.len() {
        if let Ok(number) = name[stem_len..].parse::<i32>() {
            return (&name[..stem_len], i64::from(number));
        }
    }
    (name, 1)
}

/// Tracks every name consumed in one procedure scope
#[derive(Debug, Default, Clone)]
pub struct NameLedger {
    counts: HashMap<String, i64>,
    taken: HashSet<String>,
}

impl NameLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an externally fixed name so future allocations avoid it
    pub fn reserve(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        let (stem, number) = split_name(name);
        let count = self.counts.entry(stem.to_string()).or_insert(number);
        *count = (*count).max(number);
        self.taken.insert(name.to_string());
    }

    /// Has `stem` been reserved or allocated in any form
    pub fn contains(&self, stem: &str) -> bool {
        self.counts.contains_key(stem)
    }

    /// Hand out a unique name for an already-normalized stem
    ///
    /// The first allocation of an unseen stem returns it bare; later ones
    /// append the next suffix, starting at 2.
    pub fn allocate(&mut self, stem: &str) -> String {
        let count = self.counts.entry(stem.to_string()).or_insert(0);
        loop {
            *count += 1;
            let name = if *count > 1 {
                format!("{}{}", stem, count)
            } else {
                stem.to_string()
            };
            if self.taken.insert(name.clone()) {
                return name;
            }
        }
    }

    /// Take over a name that came from outside (e.g. debug symbols)
    ///
    /// The name keeps its own number if that number is still free. Single
    /// letters in the loop-counter range move to the first free loop letter.
    pub fn adopt(&mut self, name: &str) -> String {
        if let Some(letter) = single_loop_letter(name) {
            log::trace!("adopting loop letter {}", letter);
            if let Some(free) = self.next_loop_letter() {
                self.counts.insert(free.to_string(), 1);
                self.taken.insert(free.to_string());
                return free.to_string();
            }
        }

        let (stem, number) = split_name(name);
        let count = self.counts.entry(stem.to_string()).or_insert(number - 1);
        loop {
            *count += 1;
            let adopted = if *count != 1 {
                format!("{}{}", stem, count)
            } else {
                stem.to_string()
            };
            if self.taken.insert(adopted.clone()) {
                return adopted;
            }
        }
    }

    /// First loop letter (`i` through `n`) not yet present in the ledger
    pub fn next_loop_letter(&self) -> Option<char> {
        (FIRST_LOOP_LETTER..=LAST_LOOP_LETTER).find(|c| !self.contains(&c.to_string()))
    }
}

fn single_loop_letter(name: &str) -> Option<char> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if (FIRST_LOOP_LETTER..=LAST_LOOP_LETTER).contains(&c) => Some(c),
        _ => None,
    }
}
