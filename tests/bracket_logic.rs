//! Tests for the pure bracket steps: entity grouping, byes, distribution, areas, rounds, parents.

use std::collections::HashSet;
use tournament_tree::{
    bye_count, bye_slots, check_min_competitors, distribute, elimination_rounds, group_by_entity,
    insert_byes, link_parents, max_entity_size, parent_index, repart, round_count, split_by_area,
    tree_size, Affiliation, ChampionshipSettings, Fighter, GroupPlan, GroupingKey, Slot,
    TournamentFormat, TreeGenerationError,
};

fn fighters(n: usize) -> Vec<Fighter> {
    (0..n).map(|i| Fighter::new(format!("F{i}"))).collect()
}

fn in_club(name: &str, club: u32) -> Fighter {
    Fighter::new(name).with_affiliation(Affiliation {
        club_id: Some(club),
        ..Affiliation::default()
    })
}

fn singletons(fighters: &[Fighter]) -> Vec<Vec<Fighter>> {
    group_by_entity(fighters, None)
}

#[test]
fn tree_size_is_least_scaled_power_of_two() {
    for g in 1..=5usize {
        let allowed: Vec<usize> = [1, 2, 4, 8, 16, 32, 64].iter().map(|m| m * g).collect();
        for n in 0..=(70 * g) {
            let t = tree_size(n, g);
            if n <= 64 * g {
                assert!(t >= n, "n={n} g={g} t={t}");
                assert!(allowed.contains(&t));
                assert!(allowed.iter().filter(|&&m| m >= n).all(|&m| t <= m));
            } else {
                assert_eq!(t, 64 * g);
            }
            assert_eq!(bye_count(n, g), t.saturating_sub(n));
        }
    }
}

#[test]
fn empty_roster_is_all_byes() {
    assert_eq!(tree_size(0, 2), 2);
    let byes = bye_slots(0, 2);
    assert_eq!(byes.len(), 2);
    assert!(byes.iter().all(Slot::is_bye));
}

#[test]
fn ten_fighters_need_six_byes() {
    assert_eq!(tree_size(10, 2), 16);
    assert_eq!(bye_count(10, 2), 6);
    assert_eq!(tree_size(10, 3), 12);
}

#[test]
fn group_by_entity_keeps_first_seen_order() {
    let roster = vec![
        in_club("a1", 1),
        in_club("b1", 2),
        in_club("a2", 1),
        Fighter::new("x1"),
        in_club("c1", 3),
        Fighter::new("x2"),
    ];
    let groups = group_by_entity(&roster, Some(GroupingKey::Club));
    let names: Vec<Vec<&str>> = groups
        .iter()
        .map(|g| g.iter().map(|f| f.name.as_str()).collect())
        .collect();
    assert_eq!(
        names,
        vec![vec!["a1", "a2"], vec!["b1"], vec!["x1", "x2"], vec!["c1"]]
    );
    assert_eq!(max_entity_size(&groups), 2);
}

#[test]
fn group_by_entity_without_key_is_singletons() {
    let roster = fighters(4);
    let groups = group_by_entity(&roster, None);
    assert_eq!(groups.len(), 4);
    assert!(groups.iter().all(|g| g.len() == 1));
    assert_eq!(max_entity_size(&[]), 0);
}

#[test]
fn repart_interleaves_entities() {
    let roster = vec![
        in_club("a1", 1),
        in_club("a2", 1),
        in_club("a3", 1),
        in_club("b1", 2),
        in_club("c1", 3),
        in_club("c2", 3),
    ];
    let groups = group_by_entity(&roster, Some(GroupingKey::Club));
    let order: Vec<Slot> = repart(&groups);
    let by_name = |n: &str| roster.iter().find(|f| f.name == n).unwrap().slot();
    let expected: Vec<Slot> = ["a1", "b1", "c1", "a2", "c2", "a3"]
        .iter()
        .map(|n| by_name(*n))
        .collect();
    assert_eq!(order, expected);
}

#[test]
fn insert_byes_before_nearly_every_fighter() {
    // 5 fighters, 3 byes: frequency 1
    let roster = fighters(5);
    let slots = insert_byes(repart(&singletons(&roster)), 3);
    let expected = vec![
        Slot::Bye,
        roster[0].slot(),
        Slot::Bye,
        roster[1].slot(),
        Slot::Bye,
        roster[2].slot(),
        roster[3].slot(),
        roster[4].slot(),
    ];
    assert_eq!(slots, expected);
}

#[test]
fn insert_byes_spreads_with_frequency() {
    // 6 fighters, 2 byes: frequency 3
    let roster = fighters(6);
    let slots = insert_byes(repart(&singletons(&roster)), 2);
    let byes: Vec<usize> = slots
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_bye())
        .map(|(i, _)| i)
        .collect();
    assert_eq!(byes, vec![0, 4]);
}

#[test]
fn insert_byes_without_byes_is_identity() {
    let roster = fighters(4);
    let slots = repart(&singletons(&roster));
    assert_eq!(insert_byes(slots.clone(), 0), slots);
}

#[test]
fn insert_byes_with_more_byes_than_fighters() {
    let roster = fighters(1);
    let slots = insert_byes(repart(&singletons(&roster)), 3);
    assert_eq!(
        slots,
        vec![Slot::Bye, roster[0].slot(), Slot::Bye, Slot::Bye]
    );
    assert_eq!(insert_byes(Vec::new(), 2), vec![Slot::Bye, Slot::Bye]);
}

#[test]
fn distribute_preserves_fighters() {
    for n in 0..40usize {
        let roster = fighters(n);
        let byes = bye_count(n, 2);
        let slots = distribute(&singletons(&roster), byes);
        assert_eq!(slots.len(), n + byes);
        assert_eq!(slots.iter().filter(|s| s.is_bye()).count(), byes);
        let ids: HashSet<_> = slots.iter().filter_map(Slot::fighter_id).collect();
        let expected: HashSet<_> = roster.iter().map(|f| f.id).collect();
        assert_eq!(ids.len(), n);
        assert_eq!(ids, expected);
    }
}

#[test]
fn insufficient_fighters_per_area() {
    let settings = ChampionshipSettings {
        fighting_areas: 2,
        min_competitors_per_area: 3,
        ..ChampionshipSettings::default()
    };
    assert_eq!(
        check_min_competitors(4, &settings),
        Err(TreeGenerationError::InsufficientFighters {
            fighters: 4,
            areas: 2,
            min_per_area: 3,
        })
    );
    assert!(check_min_competitors(6, &settings).is_ok());
}

#[test]
fn insufficient_fighters_iff_ratio_below_minimum() {
    for n in 0..20usize {
        for areas in 1..=4u32 {
            for min in 0..=5u32 {
                let settings = ChampionshipSettings {
                    fighting_areas: areas,
                    min_competitors_per_area: min,
                    ..ChampionshipSettings::default()
                };
                let below = (n as f64) / f64::from(areas) < f64::from(min);
                assert_eq!(check_min_competitors(n, &settings).is_err(), below);
            }
        }
    }
}

#[test]
fn split_by_area_even() {
    let slots = vec![Slot::Bye; 16];
    let areas = split_by_area(slots, 2, 2);
    assert_eq!(areas.iter().map(Vec::len).collect::<Vec<_>>(), vec![8, 8]);
}

#[test]
fn split_by_area_uneven_uses_largest_remainder() {
    let roster = fighters(16);
    let slots: Vec<Slot> = roster.iter().map(Fighter::slot).collect();
    let areas = split_by_area(slots.clone(), 3, 2);
    assert_eq!(areas.iter().map(Vec::len).collect::<Vec<_>>(), vec![6, 6, 4]);
    // contiguous and complete
    assert_eq!(areas.concat(), slots);

    let areas = split_by_area(slots, 3, 1);
    assert_eq!(areas.iter().map(Vec::len).collect::<Vec<_>>(), vec![6, 5, 5]);
}

#[test]
fn split_by_area_keeps_partial_unit_together() {
    let slots = vec![Slot::Bye; 7];
    let areas = split_by_area(slots, 2, 3);
    assert_eq!(areas.iter().map(Vec::len).collect::<Vec<_>>(), vec![3, 4]);
}

#[test]
fn parent_index_is_ceil_half() {
    let got: Vec<usize> = (1..=6).map(parent_index).collect();
    assert_eq!(got, vec![1, 1, 2, 2, 3, 3]);
}

#[test]
fn round_count_is_floor_log2() {
    assert_eq!(round_count(0), 1);
    assert_eq!(round_count(1), 1);
    assert_eq!(round_count(2), 1);
    assert_eq!(round_count(8), 3);
    assert_eq!(round_count(16), 4);
    assert_eq!(round_count(128), 7);
}

#[test]
fn elimination_rounds_halve_each_round() {
    let groups = elimination_rounds(16, 4);
    let per_round: Vec<usize> = (2..=4)
        .map(|r| groups.iter().filter(|g| g.round == r).count())
        .collect();
    assert_eq!(per_round, vec![4, 2, 1]);
    assert!(groups.iter().all(|g| g.area == 1 && g.slots == vec![Slot::Bye; 2]));
    assert!(elimination_rounds(2, 1).is_empty());
}

#[test]
fn link_parents_builds_binary_tree() {
    let mut groups: Vec<GroupPlan> = (1..=4)
        .map(|order| GroupPlan::new(1, order, 1, vec![Slot::Bye; 2]))
        .collect();
    groups.extend(elimination_rounds(8, 3));
    link_parents(&mut groups, 3).unwrap();

    let parent_orders: Vec<u32> = groups
        .iter()
        .filter(|g| g.round == 1)
        .map(|g| g.parent.unwrap().order)
        .collect();
    assert_eq!(parent_orders, vec![1, 1, 2, 2]);

    let final_group = groups.iter().find(|g| g.round == 3).unwrap();
    assert!(final_group.parent.is_none());
    for g in groups.iter().filter(|g| g.round == 2) {
        assert_eq!(g.parent.unwrap().round, 3);
    }
}

#[test]
fn link_parents_fails_without_parent_slot() {
    let mut groups: Vec<GroupPlan> = (1..=3)
        .map(|order| GroupPlan::new(1, order, 1, vec![Slot::Bye; 2]))
        .collect();
    groups.push(GroupPlan::new(1, 1, 2, vec![Slot::Bye; 2]));
    assert!(matches!(
        link_parents(&mut groups, 2),
        Err(TreeGenerationError::InvalidConfiguration(_))
    ));
}

#[test]
fn round_robin_has_no_group_size() {
    let settings = ChampionshipSettings::new(TournamentFormat::RoundRobin);
    assert_eq!(tournament_tree::group_size_for(&settings), None);
    let settings = ChampionshipSettings {
        preliminary_group_size: 4,
        ..ChampionshipSettings::new(TournamentFormat::Preliminary)
    };
    assert_eq!(tournament_tree::group_size_for(&settings), Some(4));
    let settings = ChampionshipSettings::new(TournamentFormat::DirectElimination);
    assert_eq!(tournament_tree::group_size_for(&settings), Some(2));
}
