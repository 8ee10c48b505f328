use super::*;

#[test]
fn group_requires_at_least_one_core() {
    assert!(CoreGroup::new("empty", vec![]).is_err());
    let group = CoreGroup::new("0-3", vec![0, 1, 2, 3]).unwrap();
    assert_eq!(group.desc(), "0-3");
    assert_eq!(group.cores(), &[0, 1, 2, 3]);
    assert_eq!(group.num_cores(), 4);
    assert!(group.events().is_empty());
}

#[test]
fn disjoint_groups() {
    let a = CoreGroup::new("a", vec![0, 1]).unwrap();
    let b = CoreGroup::new("b", vec![2, 3]).unwrap();
    assert_eq!(a.overlap(&b), GroupOverlap::Disjoint);
    assert_eq!(b.overlap(&a), GroupOverlap::Disjoint);
}

#[test]
fn identical_groups() {
    let a = CoreGroup::new("a", vec![0, 1]).unwrap();
    let b = CoreGroup::new("b", vec![0, 1]).unwrap();
    assert_eq!(a.overlap(&b), GroupOverlap::Identical);

    // same cores, different discovery order
    let c = CoreGroup::new("c", vec![1, 0]).unwrap();
    assert_eq!(a.overlap(&c), GroupOverlap::Identical);
}

#[test]
fn partially_overlapping_groups() {
    let a = CoreGroup::new("a", vec![0, 1]).unwrap();
    let b = CoreGroup::new("b", vec![1, 2]).unwrap();
    assert_eq!(a.overlap(&b), GroupOverlap::Partial);
    assert_eq!(b.overlap(&a), GroupOverlap::Partial);
}

#[test]
fn subset_counts_as_partial() {
    let a = CoreGroup::new("a", vec![0, 1, 2, 3]).unwrap();
    let b = CoreGroup::new("b", vec![1, 2]).unwrap();
    assert_eq!(a.overlap(&b), GroupOverlap::Partial);
    assert_eq!(b.overlap(&a), GroupOverlap::Partial);
}
