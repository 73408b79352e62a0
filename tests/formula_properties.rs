use approx::assert_relative_eq;
use pchem::formulas::boltzmann::population;
use pchem::formulas::carnot::CarnotCycle;
use pchem::formulas::hill::saturation;
use pchem::formulas::margules::{is_demixing, MixingCurves};
use pchem::formulas::maxwell_boltzmann::{molar_mass, probability_between, CharacteristicSpeeds};
use pchem::formulas::michaelis_menten::{Enzyme, Inhibition, Inhibitor};
use pchem::formulas::oscillator::{oscillator, BondPotential, Oscillator, MOLECULES};
use pchem::PchemError;
use proptest::prelude::*;

proptest! {
    #[test]
    fn boltzmann_population_is_normalized(
        levels in prop::collection::vec(0.0f64..1.0, 1..20),
        t in 1.0f64..5000.0,
    ) {
        let pop = population(&levels, t).unwrap();
        prop_assert_eq!(pop.len(), levels.len());
        prop_assert!((pop.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn raising_a_level_lowers_its_population(
        levels in prop::collection::vec(0.0f64..0.2, 2..10),
        idx in any::<prop::sample::Index>(),
        bump in 0.01f64..0.1,
        t in 100.0f64..1000.0,
    ) {
        let i = idx.index(levels.len());
        let before = population(&levels, t).unwrap()[i];
        let mut raised = levels.clone();
        raised[i] += bump;
        let after = population(&raised, t).unwrap()[i];
        prop_assert!(after < before);
    }

    #[test]
    fn carnot_closed_forms(
        t_cold in 50.0f64..500.0,
        dt in 1.0f64..500.0,
        v1 in 0.1f64..5.0,
        dv in 0.1f64..5.0,
    ) {
        let t_hot = t_cold + dt;
        let cycle = CarnotCycle::new(t_cold, t_hot, v1, v1 + dv).unwrap();
        prop_assert_eq!(cycle.efficiency, 1.0 - t_cold / t_hot);
        let balance = cycle.heat_absorbed() - cycle.heat_released();
        prop_assert!((cycle.total_work - balance).abs() <= 1e-9 * balance.abs().max(1.0));
    }

    #[test]
    fn hill_is_monotonic(
        l in 0.0f64..500.0,
        dl in 0.001f64..50.0,
        l50 in 1.0f64..100.0,
        n in 0.1f64..10.0,
    ) {
        let lo = saturation(l, l50, n).unwrap();
        let hi = saturation(l + dl, l50, n).unwrap();
        prop_assert!((0.0..=1.0).contains(&lo));
        prop_assert!(hi >= lo);
    }
}

#[test]
fn maxwell_boltzmann_for_every_tabulated_gas() {
    for gas in ["H_2", "He", "N_2", "O_2", "Xe"] {
        let m = molar_mass(gas).unwrap();
        let p = probability_between(0.0, 20_000.0, m, 300.0, 40_000).unwrap();
        assert_relative_eq!(p, 1.0, epsilon = 1e-6);

        let speeds = CharacteristicSpeeds::new(m, 300.0).unwrap();
        assert_relative_eq!(speeds.rms / speeds.most_probable, 1.5f64.sqrt(), epsilon = 1e-12);
    }
}

#[test]
fn michaelis_menten_default_dashboard_inputs() {
    let enzyme = Enzyme::new(0.015, 0.14, 1.0);
    let inhibitor = Inhibitor::new(0.0, 1.0, "competitive".parse::<Inhibition>().unwrap());
    // zero inhibitor concentration changes nothing
    assert_eq!(
        enzyme.kinetics(Some(&inhibitor)).unwrap(),
        enzyme.kinetics(None).unwrap()
    );
}

#[test]
fn margules_demixing_boundary() {
    let t = 298.0;
    let critical = 2.0 * pchem::formulas::GAS_CONSTANT * t;
    assert!(!is_demixing(critical, t).unwrap());
    assert!(is_demixing(critical * 1.01, t).unwrap());

    let curves = MixingCurves::new(critical * 1.5, t, 2001).unwrap();
    let (lo, hi) = curves.stable_compositions();
    assert!(lo < hi);
}

#[test]
fn every_tabulated_molecule_builds_both_potentials() {
    for (name, _) in MOLECULES {
        for kind in [Oscillator::Morse, Oscillator::Hooke] {
            let potential = oscillator(name, kind).unwrap();
            let curve = potential.curve(&potential.default_grid()).unwrap();
            assert_eq!(curve.level_lines.len(), curve.levels.len());
            let re = potential.equilibrium_distance();
            assert!(curve.energy.iter().all(|&v| v >= potential.energy(re) - 1e-30));
        }
    }
}

#[test]
fn out_of_domain_inputs_are_domain_errors() {
    assert!(matches!(population(&[0.0], 0.0), Err(PchemError::Domain(_))));
    assert!(matches!(
        CarnotCycle::new(250.0, 300.0, 2.0, 1.0),
        Err(PchemError::Domain(_))
    ));
    assert!(matches!(saturation(1.0, -1.0, 1.0), Err(PchemError::Domain(_))));
}
