use serde::Serialize;
use std::collections::BTreeMap;

/// One holder group's stake in a given year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shareholder {
    pub name: &'static str,
    pub percentage: u32,
    pub shares: u64,
}

const HOLDER_GROUPS: [&str; 4] = [
    "Institutional Investors",
    "Retail Investors",
    "Company Executives",
    "Other",
];

/// `(year, [(percentage, shares); 4])` in [`HOLDER_GROUPS`] order.
const COMPOSITION: [(i32, [(u32, u64); 4]); 6] = [
    (2019, [(45, 4_500_000), (30, 3_000_000), (15, 1_500_000), (10, 1_000_000)]),
    (2020, [(48, 4_800_000), (28, 2_800_000), (14, 1_400_000), (10, 1_000_000)]),
    (2021, [(50, 5_000_000), (25, 2_500_000), (15, 1_500_000), (10, 1_000_000)]),
    (2022, [(52, 5_200_000), (23, 2_300_000), (15, 1_500_000), (10, 1_000_000)]),
    (2023, [(55, 5_500_000), (20, 2_000_000), (15, 1_500_000), (10, 1_000_000)]),
    (2024, [(58, 5_800_000), (17, 1_700_000), (15, 1_500_000), (10, 1_000_000)]),
];

fn expand(stakes: &[(u32, u64); 4]) -> Vec<Shareholder> {
    HOLDER_GROUPS
        .iter()
        .zip(stakes.iter())
        .map(|(name, (percentage, shares))| Shareholder {
            name: *name,
            percentage: *percentage,
            shares: *shares,
        })
        .collect()
}

/// Shareholder composition for one year, if the table has it.
pub fn shareholders_for(year: i32) -> Option<Vec<Shareholder>> {
    COMPOSITION
        .iter()
        .find(|(y, _)| *y == year)
        .map(|(_, stakes)| expand(stakes))
}

/// Composition for every year in the table.
pub fn all_shareholders() -> BTreeMap<i32, Vec<Shareholder>> {
    COMPOSITION
        .iter()
        .map(|(year, stakes)| (*year, expand(stakes)))
        .collect()
}
