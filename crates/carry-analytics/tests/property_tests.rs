//! Property-based tests for the calculation invariants.
//!
//! - Break-even equals spot when payoff equals price
//! - Instruments without a usable quote never appear in the results
//! - Results are ordered by maturity whatever the input order
//! - Scenario matrix corners are the band-edge ratios
//! - Corridor legs are monotone in time

use approx::assert_relative_eq;
use proptest::prelude::*;

use carry_analytics::{
    band_samples, compute_breakevens, compute_matrix, project_band, ReturnFormula,
};
use carry_core::{Band, Date, Instrument, Quote, QuoteBook, ReferenceTable};

fn base_date() -> Date {
    Date::from_ymd(2025, 4, 14).unwrap()
}

/// (maturity offset in days, payoff, optional price) per instrument.
fn instrument_specs() -> impl Strategy<Value = Vec<(i64, f64, Option<f64>)>> {
    prop::collection::vec(
        (
            0i64..1000,
            100.0f64..200.0,
            prop_oneof![
                3 => (50.0f64..200.0).prop_map(Some),
                1 => (-50.0f64..=0.0).prop_map(Some),
                1 => Just(None),
            ],
        ),
        0..30,
    )
}

fn build_inputs(specs: &[(i64, f64, Option<f64>)]) -> (ReferenceTable, QuoteBook) {
    let mut table = ReferenceTable::new();
    let mut quotes = QuoteBook::new();
    for (i, (offset, payoff, price)) in specs.iter().enumerate() {
        let id = format!("I{i:03}");
        table
            .insert(Instrument::new(id.as_str(), base_date() + *offset, *payoff).unwrap())
            .unwrap();
        if let Some(p) = price {
            quotes.insert(Quote::new(id.as_str(), *p));
        }
    }
    (table, quotes)
}

proptest! {
    #[test]
    fn prop_par_price_breakeven_is_spot(spot in 1.0f64..5000.0, payoff in 1.0f64..500.0) {
        let table = ReferenceTable::from_instruments([
            Instrument::new("PAR", base_date(), payoff).unwrap(),
        ]).unwrap();
        let quotes: QuoteBook = [Quote::new("PAR", payoff)].into_iter().collect();

        let results = compute_breakevens(spot, &table, &quotes).unwrap();
        prop_assert_eq!(results.len(), 1);
        prop_assert_eq!(results[0].breakeven, spot);
    }

    #[test]
    fn prop_unusable_quotes_never_appear(spot in 100.0f64..3000.0, specs in instrument_specs()) {
        let (table, quotes) = build_inputs(&specs);
        let results = compute_breakevens(spot, &table, &quotes).unwrap();

        let expected = specs.iter().filter(|(_, _, p)| p.is_some_and(|p| p > 0.0)).count();
        prop_assert_eq!(results.len(), expected);
        for r in &results {
            prop_assert!(r.price > 0.0);
            prop_assert!(quotes.usable_price(&r.id).is_some());
        }
    }

    #[test]
    fn prop_results_sorted_by_maturity(spot in 100.0f64..3000.0, specs in instrument_specs()) {
        let (table, quotes) = build_inputs(&specs);
        let results = compute_breakevens(spot, &table, &quotes).unwrap();

        for pair in results.windows(2) {
            prop_assert!(
                (pair[0].maturity, &pair[0].id) <= (pair[1].maturity, &pair[1].id)
            );
        }
    }

    #[test]
    fn prop_matrix_corners_are_edge_ratios(
        entry_low in 500.0f64..1500.0,
        entry_width in 0.0f64..800.0,
        exit_low in 500.0f64..1500.0,
        exit_width in 0.0f64..800.0,
        samples in 2usize..10,
    ) {
        let entry = Band::new(entry_low, entry_low + entry_width).unwrap();
        let exit = Band::new(exit_low, exit_low + exit_width).unwrap();
        let m = compute_matrix(entry, exit, ReturnFormula::fx_only(), samples).unwrap();

        prop_assert_eq!(m.dimensions(), (samples, samples));
        let last = samples - 1;
        let corner = |row: usize, col: usize| m.cell(row, col).unwrap().value().unwrap();
        assert_relative_eq!(corner(0, 0), (entry.low / exit.low - 1.0) * 100.0, epsilon = 1e-9);
        assert_relative_eq!(corner(0, last), (entry.low / exit.high - 1.0) * 100.0, epsilon = 1e-9);
        assert_relative_eq!(corner(last, 0), (entry.high / exit.low - 1.0) * 100.0, epsilon = 1e-9);
        assert_relative_eq!(
            corner(last, last),
            (entry.high / exit.high - 1.0) * 100.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn prop_simple_bond_return_shifts_every_cell(bond_return in -50.0f64..50.0) {
        let entry = Band::new(1000.0, 1400.0).unwrap();
        let exit = Band::new(950.0, 1477.0).unwrap();
        let plain = compute_matrix(entry, exit, ReturnFormula::fx_only(), 6).unwrap();
        let shifted = compute_matrix(
            entry,
            exit,
            ReturnFormula::Simple { bond_return_pct: bond_return },
            6,
        )
        .unwrap();

        for (a, b) in plain.cells.iter().flatten().zip(shifted.cells.iter().flatten()) {
            assert_relative_eq!(
                b.value().unwrap() - a.value().unwrap(),
                bond_return,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn prop_samples_span_band(low in -100.0f64..2000.0, width in 0.0f64..1000.0, n in 2usize..12) {
        let band = Band::new(low, low + width).unwrap();
        let samples = band_samples(band, n).unwrap();
        prop_assert_eq!(samples.len(), n);
        prop_assert_eq!(samples[0], band.low);
        prop_assert_eq!(samples[n - 1], band.high);
        prop_assert!(samples.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn prop_corridor_legs_monotone(days in prop::collection::vec(0i64..900, 1..20)) {
        let mut dates: Vec<Date> = days.iter().map(|d| base_date() + *d).collect();
        dates.sort();
        let upper = project_band(base_date(), 1400.0, 0.01, &dates).unwrap();
        let lower = project_band(base_date(), 1000.0, -0.01, &dates).unwrap();

        prop_assert!(upper.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(lower.windows(2).all(|w| w[0] >= w[1]));
        prop_assert!(upper.iter().zip(&lower).all(|(u, l)| u > l));
    }
}
