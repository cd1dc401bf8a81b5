//! End-to-end search properties over a reduced eight-planet space:
//! Mercury and Venus vary over {1, 2, 3, 5}, Jupiter and Saturn follow the
//! built-in scenarios, everything else is held at `3` primary.

use std::collections::BTreeSet;

use tula_model::{
    Assignment, BalanceModel, BodyTable, ModelConstants, PhaseChoice, QuantumNumber,
    solar_system_table,
};
use tula_search::{
    QuantumDomain, SearchConfig, SearchEngine, SearchOutcome, SearchPhase, SearchSpace,
    merge_partitions, solar_system_scenarios,
};

const TOTAL: usize = 3 * 8 * 8;

fn reduced_space(table: &BodyTable) -> SearchSpace {
    let canonical =
        vec![Assignment::new(QuantumNumber::integer(3).unwrap(), PhaseChoice::Primary); table.len()];
    SearchSpace::new(
        table,
        vec![
            table.index_of("Mercury").unwrap(),
            table.index_of("Venus").unwrap(),
        ],
        QuantumDomain::integers(&[1, 2, 3, 5]).unwrap(),
        canonical,
        Some(solar_system_scenarios(table).unwrap()),
    )
    .unwrap()
}

fn run(table: &BodyTable, space: &SearchSpace, threshold: f64, parallel: bool) -> SearchOutcome {
    let model = BalanceModel::new(table, &ModelConstants::standard()).unwrap();
    let config = SearchConfig {
        threshold,
        parallel,
    };
    let mut engine = SearchEngine::new(model, space, config).unwrap();
    let out = engine.run().unwrap();
    assert_eq!(engine.phase(), SearchPhase::Done);
    out
}

fn ordinals(out: &SearchOutcome) -> BTreeSet<usize> {
    out.results.iter().map(|r| r.ordinal).collect()
}

#[test]
fn zero_threshold_keeps_everything() {
    let t = solar_system_table().unwrap();
    let s = reduced_space(&t);
    assert_eq!(s.total_len(), TOTAL);
    let out = run(&t, &s, 0.0, true);
    assert_eq!(out.stats.enumerated, TOTAL);
    assert_eq!(out.stats.retained, TOTAL);
    assert_eq!(out.stats.rejected, 0);
    assert_eq!(ordinals(&out), (0..TOTAL).collect());
}

#[test]
fn repeated_runs_identical() {
    let t = solar_system_table().unwrap();
    let s = reduced_space(&t);
    let a = run(&t, &s, 50.0, true);
    let b = run(&t, &s, 50.0, true);
    assert_eq!(a, b);
}

#[test]
fn parallel_matches_sequential() {
    let t = solar_system_table().unwrap();
    let s = reduced_space(&t);
    let par = run(&t, &s, 0.0, true);
    let seq = run(&t, &s, 0.0, false);
    assert_eq!(par, seq);
    for (p, q) in par.results.iter().zip(&seq.results) {
        assert_eq!(p.balance().to_bits(), q.balance().to_bits());
    }
}

#[test]
fn higher_threshold_yields_subset() {
    let t = solar_system_table().unwrap();
    let s = reduced_space(&t);
    let mut previous = ordinals(&run(&t, &s, 0.0, true));
    for threshold in [25.0, 50.0, 75.0, 90.0, 99.0] {
        let out = run(&t, &s, threshold, true);
        let current = ordinals(&out);
        assert!(current.is_subset(&previous), "threshold {threshold}");
        assert!(out.results.iter().all(|r| r.balance() >= threshold));
        previous = current;
    }
}

#[test]
fn output_sorted_by_balance_then_ordinal() {
    let t = solar_system_table().unwrap();
    let s = reduced_space(&t);
    let out = run(&t, &s, 0.0, false);
    for w in out.results.windows(2) {
        assert!(
            w[0].balance() > w[1].balance()
                || (w[0].balance() == w[1].balance() && w[0].ordinal < w[1].ordinal),
            "{} / {} then {} / {}",
            w[0].balance(),
            w[0].ordinal,
            w[1].balance(),
            w[1].ordinal
        );
    }
}

#[test]
fn merged_slices_match_single_run() {
    let t = solar_system_table().unwrap();
    let s = reduced_space(&t);
    let whole = run(&t, &s, 40.0, true);

    let model = BalanceModel::new(&t, &ModelConstants::standard()).unwrap();
    let config = SearchConfig {
        threshold: 40.0,
        parallel: true,
    };
    let parts: Vec<SearchOutcome> = (0..s.slice_count())
        .rev()
        .map(|slice| {
            let mut engine = SearchEngine::new(model, &s, config).unwrap();
            engine.run_slice(slice).unwrap()
        })
        .collect();
    let merged = merge_partitions(parts);
    assert_eq!(merged, whole);
}

#[test]
fn scenario_tags_follow_slices() {
    let t = solar_system_table().unwrap();
    let s = reduced_space(&t);
    let out = run(&t, &s, 0.0, true);
    for r in &out.results {
        let expected = match r.ordinal / 64 {
            0 => "J1-S1",
            1 => "J1-S2",
            _ => "J2-S3",
        };
        assert_eq!(r.scenario, expected, "ordinal {}", r.ordinal);
    }
}

#[test]
fn scenario_filter_restricts_output() {
    let t = solar_system_table().unwrap();
    let s = reduced_space(&t).with_scenarios_named(&["J1-S2"]).unwrap();
    let out = run(&t, &s, 0.0, true);
    assert_eq!(out.results.len(), 64);
    assert!(out.results.iter().all(|r| r.scenario == "J1-S2"));
}

#[test]
fn results_carry_full_evaluation() {
    let t = solar_system_table().unwrap();
    let s = reduced_space(&t);
    let out = run(&t, &s, 0.0, true);
    let earth = t.reference_index();
    for r in &out.results {
        assert_eq!(r.evaluation.checks.len(), t.len());
        assert!(r.evaluation.checks[earth].trend_match.is_none());
        assert_eq!(
            r.passes(),
            r.evaluation.checks.iter().all(|c| c.passes()),
            "ordinal {}",
            r.ordinal
        );
        assert_eq!(s.configuration_at_ordinal(r.ordinal).unwrap(), r.configuration);
    }
    assert_eq!(
        out.stats.passing,
        out.results.iter().filter(|r| r.passes()).count()
    );
}
