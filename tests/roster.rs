//! Roster CSV import.

use tournament_tree::{read_roster, GroupingKey};

#[test]
fn reads_names_and_affiliations() {
    let csv = "name,federation_id,association_id,club_id\n\
               Aiko, 1, 10, 100\n\
               Bruno,1,,\n\
               ,2,20,200\n\
               Chen,2,20,\n";
    let fighters = read_roster(csv.as_bytes()).unwrap();
    let names: Vec<&str> = fighters.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Aiko", "Bruno", "Chen"]);

    assert_eq!(fighters[0].affiliation.get(GroupingKey::Club), Some(100));
    assert_eq!(fighters[1].affiliation.federation_id, Some(1));
    assert_eq!(fighters[1].affiliation.association_id, None);
    assert_eq!(fighters[2].affiliation.get(GroupingKey::Association), Some(20));
    assert_eq!(fighters[2].affiliation.club_id, None);
}

#[test]
fn name_only_roster() {
    let fighters = read_roster("name\nAiko\nBruno\n".as_bytes()).unwrap();
    assert_eq!(fighters.len(), 2);
    assert_ne!(fighters[0].id, fighters[1].id);
    assert_eq!(fighters[0].affiliation, Default::default());
}

#[test]
fn bad_affiliation_is_an_error() {
    assert!(read_roster("name,club_id\nAiko,not-a-number\n".as_bytes()).is_err());
}
