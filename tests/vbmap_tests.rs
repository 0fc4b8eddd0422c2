use mockcluster::{
    Cluster, ClusterError, ClusterOptions, NewBucketOptions, NewNodeOptions, VbMap,
};
use std::collections::HashSet;

fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn four_vbucket_scenario_single_then_two_nodes() {
    let cluster = Cluster::new(
        ClusterOptions::new()
            .num_vbuckets(4)
            .initial_node(NewNodeOptions::with_id("n0")),
    )
    .unwrap();
    let bucket = cluster.add_bucket(NewBucketOptions::new("default")).unwrap();

    let map = bucket.vb_map();
    assert_eq!(map.len(), 4);
    for entry in map.entries() {
        assert_eq!(entry.primary, "n0");
        assert!(entry.replicas.is_empty());
    }

    cluster.add_node(NewNodeOptions::with_id("n1")).unwrap();
    bucket.update_vb_map(&ids(&["n0", "n1"])).unwrap();

    let map = bucket.vb_map();
    assert_eq!(map.len(), 4);
    assert!(!map.partitions_owned_by("n0").is_empty());
    assert!(!map.partitions_owned_by("n1").is_empty());
    for entry in map.entries() {
        assert_eq!(entry.replicas.len(), 1);
        let expected = if entry.primary == "n0" { "n1" } else { "n0" };
        assert_eq!(entry.replicas[0], expected);
    }
}

#[test]
fn compute_is_deterministic() {
    let nodes = ids(&["a", "b", "c", "d"]);
    let first = VbMap::compute(1024, 2, &nodes).unwrap();
    let second = VbMap::compute(1024, 2, &nodes).unwrap();
    assert_eq!(first, second);

    let reordered = ids(&["d", "c", "b", "a"]);
    assert_ne!(first, VbMap::compute(1024, 2, &reordered).unwrap());
}

#[test]
fn update_vb_map_twice_gives_identical_maps() {
    let cluster = Cluster::new(ClusterOptions::new().num_vbuckets(64)).unwrap();
    cluster.add_node(NewNodeOptions::new()).unwrap();
    cluster.add_node(NewNodeOptions::new()).unwrap();
    let bucket = cluster.add_bucket(NewBucketOptions::new("default")).unwrap();
    let nodes = cluster.node_ids();

    bucket.update_vb_map(&nodes).unwrap();
    let first = bucket.vb_map();
    bucket.update_vb_map(&nodes).unwrap();
    let second = bucket.vb_map();

    assert_eq!(*first, *second);
}

#[test]
fn every_vbucket_has_exactly_one_primary_from_the_list() {
    for node_count in 1..=6 {
        let nodes: Vec<String> = (0..node_count).map(|i| format!("node-{}", i)).collect();
        let map = VbMap::compute(100, 1, &nodes).unwrap();
        assert_eq!(map.len(), 100);

        let allowed: HashSet<&str> = nodes.iter().map(String::as_str).collect();
        for vb in 0..100 {
            let primary = map.primary_for(vb).unwrap();
            assert!(allowed.contains(primary));
        }
        assert!(map.referenced_nodes().is_subset(&allowed));
        assert!(map.primary_for(100).is_none());
    }
}

#[test]
fn replica_count_degrades_with_small_clusters() {
    let one = VbMap::compute(8, 3, &ids(&["a"])).unwrap();
    assert!(one.entries().iter().all(|e| e.replicas.is_empty()));

    let two = VbMap::compute(8, 3, &ids(&["a", "b"])).unwrap();
    assert!(two.entries().iter().all(|e| e.replicas.len() == 1));

    let three = VbMap::compute(8, 3, &ids(&["a", "b", "c"])).unwrap();
    assert!(three.entries().iter().all(|e| e.replicas.len() == 2));

    let five = VbMap::compute(8, 3, &ids(&["a", "b", "c", "d", "e"])).unwrap();
    assert!(five.entries().iter().all(|e| e.replicas.len() == 3));

    let none = VbMap::compute(8, 0, &ids(&["a", "b", "c"])).unwrap();
    assert!(none.entries().iter().all(|e| e.replicas.is_empty()));
}

#[test]
fn replicas_never_repeat_the_primary_or_each_other() {
    let nodes = ids(&["a", "b", "c", "d"]);
    let map = VbMap::compute(64, 3, &nodes).unwrap();
    for entry in map.entries() {
        let owners: Vec<&str> = entry.owners().collect();
        let distinct: HashSet<&str> = owners.iter().copied().collect();
        assert_eq!(owners.len(), 4);
        assert_eq!(distinct.len(), 4);
    }
}

#[test]
fn primaries_are_balanced() {
    let nodes = ids(&["a", "b", "c"]);
    let map = VbMap::compute(1024, 1, &nodes).unwrap();

    let counts: Vec<usize> = nodes
        .iter()
        .map(|n| map.partitions_owned_by(n).len())
        .collect();
    assert_eq!(counts.iter().sum::<usize>(), 1024);
    let max = *counts.iter().max().unwrap();
    let min = *counts.iter().min().unwrap();
    assert!(max - min <= 1, "unbalanced primaries: {:?}", counts);

    assert_eq!(map.replica_partitions_of("a").len(), map.partitions_owned_by("c").len());
}

#[test]
fn compute_rejects_bad_node_lists() {
    let err = VbMap::compute(4, 1, &[]).unwrap_err();
    assert!(matches!(err, ClusterError::InvalidVbMap(_)));

    let err = VbMap::compute(4, 1, &ids(&["a", "a"])).unwrap_err();
    assert!(
        err.to_string().contains("more than once"),
        "unexpected error: {}",
        err
    );

    let err = VbMap::compute(4, 1, &ids(&["a", " "])).unwrap_err();
    assert!(matches!(err, ClusterError::InvalidVbMap(_)));
}

#[test]
fn failed_update_keeps_previous_map() {
    let cluster = Cluster::new(
        ClusterOptions::new()
            .num_vbuckets(4)
            .initial_node(NewNodeOptions::with_id("n0")),
    )
    .unwrap();
    let bucket = cluster.add_bucket(NewBucketOptions::new("default")).unwrap();
    let before = bucket.vb_map();
    let revision = cluster.config_revision();

    assert!(bucket.update_vb_map(&[]).is_err());
    assert_eq!(*bucket.vb_map(), *before);
    assert_eq!(cluster.config_revision(), revision);
}

#[test]
fn old_map_handles_are_not_mutated_by_rebuilds() {
    let cluster = Cluster::new(
        ClusterOptions::new()
            .num_vbuckets(4)
            .initial_node(NewNodeOptions::with_id("n0")),
    )
    .unwrap();
    let bucket = cluster.add_bucket(NewBucketOptions::new("default")).unwrap();
    let before = bucket.vb_map();

    cluster.add_node(NewNodeOptions::with_id("n1")).unwrap();

    assert!(before.entries().iter().all(|e| e.primary == "n0"));
    assert_eq!(bucket.vb_map().primary_for(1), Some("n1"));
    assert_eq!(bucket.vb_map().replicas_for(1), &["n0".to_string()][..]);
}

#[test]
fn update_vb_map_rejects_ids_that_never_joined() {
    let cluster = Cluster::new(
        ClusterOptions::new()
            .num_vbuckets(4)
            .initial_node(NewNodeOptions::with_id("n0")),
    )
    .unwrap();
    let bucket = cluster.add_bucket(NewBucketOptions::new("default")).unwrap();
    let revision = cluster.config_revision();

    let err = bucket.update_vb_map(&ids(&["ghost"])).unwrap_err();
    assert!(matches!(err, ClusterError::InvalidVbMap(_)));
    assert!(err.to_string().contains("ghost"), "unexpected error: {}", err);

    let err = bucket.update_vb_map(&ids(&["n0", "ghost"])).unwrap_err();
    assert!(matches!(err, ClusterError::InvalidVbMap(_)));

    assert!(bucket.vb_map().entries().iter().all(|e| e.primary == "n0"));
    assert!(!bucket.vb_map().referenced_nodes().contains("ghost"));
    assert_eq!(cluster.config_revision(), revision);
    let snapshot = cluster.topology();
    let published = &snapshot.bucket("default").unwrap().vbucket_map;
    assert!(published.iter().all(|e| e.primary == "n0"));

    assert!(!cluster.handle().is_member("ghost"));
    cluster.add_node(NewNodeOptions::with_id("ghost")).unwrap();
    assert!(cluster.handle().is_member("ghost"));
    bucket.update_vb_map(&ids(&["ghost", "n0"])).unwrap();
    assert_eq!(bucket.vb_map().primary_for(0), Some("ghost"));
}
