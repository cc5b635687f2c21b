//! Property tests for step resolution, dispatch and debouncing

use ligght_core::bus::{plan, ChainConfig, RoleFlags, MAX_CHAIN_LEN};
use ligght_core::program::{Programs, TimeScale};
use ligght_core::sequencer::Sequencer;
use ligght_core::state::LightState;
use proptest::prelude::*;

const MAIN: &[u8] = &[0xAA];
const SECONDARY: &[u8] = &[0x55];

fn programs(unit_ms: u32) -> Programs {
    Programs::builtin(TimeScale::from_unit_ms(unit_ms)).unwrap()
}

proptest! {
    #[test]
    fn every_instant_maps_to_its_step(unit_ms in 1u32..200, frac in 0.0f64..1.0) {
        let programs = programs(unit_ms);
        for table in [&programs.maintenance, &programs.simple_light, &programs.four_way_junction] {
            let t = (table.cycle_length_ms() as f64 * frac) as u32;
            let (index, step) = table.step_at(t).unwrap();

            prop_assert!(step.contains(t));
            // No other step contains t
            let holders = table.steps().iter().filter(|s| s.contains(t)).count();
            prop_assert_eq!(holders, 1);
            prop_assert_eq!(&table.steps()[index], step);
        }
    }

    #[test]
    fn wraparound_is_cyclic(unit_ms in 1u32..200, t in 0u32..1_000_000) {
        let programs = programs(unit_ms);
        for table in [&programs.maintenance, &programs.simple_light, &programs.four_way_junction] {
            let cycle = table.cycle_length_ms();
            prop_assert_eq!(table.step_at_wrapped(t).0, table.step_at_wrapped(t + cycle).0);
            prop_assert_eq!(table.step_at_wrapped(cycle).0, 0);
        }
    }

    #[test]
    fn parity_alternates_and_slave_inverts(
        addresses in prop::collection::vec(0x08u8..0x78, 1..=MAX_CHAIN_LEN)
    ) {
        let master = ChainConfig::new(&addresses, RoleFlags::new(false, false));
        let slave = ChainConfig::new(&addresses, RoleFlags::new(false, true));

        let master_plan = plan(&master, MAIN, SECONDARY).unwrap();
        let slave_plan = plan(&slave, MAIN, SECONDARY).unwrap();

        prop_assert_eq!(master_plan.len(), addresses.len());
        for (i, (m, s)) in master_plan.iter().zip(slave_plan.iter()).enumerate() {
            prop_assert_eq!(m.address, addresses[i]);
            prop_assert_eq!(s.address, addresses[i]);
            let expected = if i % 2 == 0 { MAIN } else { SECONDARY };
            prop_assert_eq!(m.payload, expected);
            prop_assert_ne!(m.payload, s.payload);
        }
    }

    #[test]
    fn simple_fixture_writes_once(
        addresses in prop::collection::vec(0x08u8..0x78, 1..=MAX_CHAIN_LEN),
        slave in any::<bool>(),
        main in prop::collection::vec(any::<u8>(), 1..8),
    ) {
        let chain = ChainConfig::new(&addresses, RoleFlags::new(true, slave));
        let writes = plan(&chain, &main, SECONDARY).unwrap();

        prop_assert_eq!(writes.len(), 1);
        prop_assert_eq!(writes[0].address, addresses[0]);
        prop_assert_eq!(writes[0].payload, SECONDARY);
    }

    #[test]
    fn phase_is_independent_of_uptime(
        origin in 0u64..(1u64 << 40),
        offsets in prop::collection::vec(0u64..100_000, 1..20),
    ) {
        let programs = programs(10);
        let mut fresh = Sequencer::new(&programs, RoleFlags::JUNCTION_MASTER);
        let mut late = Sequencer::new(&programs, RoleFlags::JUNCTION_MASTER);
        fresh.select_mode(LightState::On);
        late.select_mode(LightState::On);
        fresh.tick(0);
        late.tick(origin);

        let mut sorted = offsets;
        sorted.sort_unstable();
        for offset in sorted {
            prop_assert_eq!(fresh.tick(offset), late.tick(origin + offset));
        }
    }

    #[test]
    fn repeated_tick_never_dispatches_twice(
        times in prop::collection::vec(0u64..20_000, 1..40),
        simple in any::<bool>(),
    ) {
        let programs = programs(10);
        let mut seq = Sequencer::new(&programs, RoleFlags::new(simple, false));
        seq.select_mode(LightState::On);

        let mut sorted = times;
        sorted.sort_unstable();
        for t in sorted {
            seq.tick(t);
            prop_assert!(seq.tick(t).is_none());
        }
    }
}
