use dox::domain::{Configuration, Discovery, Profile};
use dox::services::profile_resolver::resolve;
use dox::{DoxError, discover};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

fn profile(slices: &[&str], extends: Option<&str>) -> Profile {
    Profile {
        slices: slices.iter().map(|s| s.to_string()).collect(),
        extends: extends.map(str::to_string),
        ..Default::default()
    }
}

#[test]
fn test_discovery_counts_base_and_slices() {
    let temp = tempfile::tempdir().unwrap();
    let slice_names = ["zeta", "alpha", "mid", "beta"];

    fs::write(temp.path().join("compose.yaml"), "").unwrap();
    for name in slice_names {
        fs::write(temp.path().join(format!("compose.{name}.yaml")), "").unwrap();
    }

    let discovery = discover(temp.path()).unwrap();

    assert_eq!(discovery.files.len(), 1 + slice_names.len());
    assert_eq!(discovery.files[0], temp.path().join("compose.yaml"));

    let names: Vec<&String> = discovery.slices.keys().collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);

    let expected: Vec<PathBuf> = ["alpha", "beta", "mid", "zeta"]
        .iter()
        .map(|n| temp.path().join(format!("compose.{n}.yaml")))
        .collect();
    assert_eq!(&discovery.files[1..], &expected[..]);
}

#[test]
fn test_resolve_documented_example() {
    let mut slices = BTreeMap::new();
    slices.insert("dev".to_string(), PathBuf::from("compose.dev.yaml"));
    slices.insert("db".to_string(), PathBuf::from("compose.db.yaml"));
    let discovery = Discovery::new(Some(PathBuf::from("compose.yaml")), slices);

    let mut config = Configuration::default();
    config
        .profiles
        .insert("app".into(), profile(&["db", "dev"], None));

    let resolved = resolve("app", &config, &discovery).unwrap();
    assert_eq!(
        resolved.files,
        vec![
            PathBuf::from("compose.yaml"),
            PathBuf::from("compose.db.yaml"),
            PathBuf::from("compose.dev.yaml"),
        ]
    );
}

#[test]
fn test_long_chain_terminates_with_unique_slices() {
    let depth = 20;
    let mut slices = BTreeMap::new();
    let mut config = Configuration::default();

    for i in 0..depth {
        let name = format!("p{i}");
        let own = format!("s{i}");
        slices.insert(own.clone(), PathBuf::from(format!("compose.{own}.yaml")));
        // Every profile also repeats the root slice
        let parent = (i > 0).then(|| format!("p{}", i - 1));
        config.profiles.insert(
            name,
            Profile {
                slices: vec!["s0".into(), own],
                extends: parent,
                ..Default::default()
            },
        );
    }

    let discovery = Discovery::new(None, slices);
    let resolved = resolve(&format!("p{}", depth - 1), &config, &discovery).unwrap();

    let expected: Vec<PathBuf> = (0..depth)
        .map(|i| PathBuf::from(format!("compose.s{i}.yaml")))
        .collect();
    assert_eq!(resolved.files, expected);
}

#[test]
fn test_mutual_extension_is_rejected() {
    let mut config = Configuration::default();
    config.profiles.insert("a".into(), profile(&[], Some("b")));
    config.profiles.insert("b".into(), profile(&[], Some("a")));

    for start in ["a", "b"] {
        let err = resolve(start, &config, &Discovery::default()).unwrap_err();
        assert!(matches!(err, DoxError::CircularInheritance { .. }));
    }
}
