use super::{ImpactMaterial, ImpactMaterialCategory, ObjectDescriptor};

#[test]
fn bucket_zero_for_small_extents() {
    let m = ImpactMaterial::from_bbox_extent_sum(ImpactMaterialCategory::Metal, 0.05);
    assert_eq!(m.size_bucket, 0);
}

#[test]
fn bucket_boundaries_match_threshold_table() {
    let cases = [
        (0.05, 0),
        (0.15, 1),
        (0.3, 2),
        (0.7, 3),
        (2.0, 4),
        (10.0, 5),
    ];
    for (extent, expected_bucket) in cases {
        let m = ImpactMaterial::from_bbox_extent_sum(ImpactMaterialCategory::Stone, extent);
        assert_eq!(m.size_bucket, expected_bucket, "extent {extent}");
    }
}

#[test]
#[should_panic(expected = "size bucket")]
fn new_panics_on_out_of_range_bucket() {
    ImpactMaterial::new(ImpactMaterialCategory::Glass, 6);
}

#[test]
fn descriptor_starts_with_zero_speed() {
    let desc = ObjectDescriptor::new(
        1,
        ImpactMaterial::new(ImpactMaterialCategory::WoodHard, 0),
        0.5,
        0.5,
        1.0,
        None,
    );
    assert_eq!(desc.speed, 0.0);
    assert_eq!(desc.angular_speed, 0.0);
}
