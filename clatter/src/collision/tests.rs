use super::{pair_id, CollisionError, CollisionEvent, CollisionKind, Position};
use crate::object::{ImpactMaterial, ImpactMaterialCategory, ObjectDescriptor};

fn obj(id: u32, speed: f64) -> ObjectDescriptor {
    let mut o = ObjectDescriptor::new(
        id,
        ImpactMaterial::new(ImpactMaterialCategory::Metal, 0),
        0.5,
        0.5,
        1.0,
        None,
    );
    o.speed = speed;
    o
}

#[test]
fn pair_id_packs_both_ids() {
    assert_eq!(pair_id(1, 2), (1u64 << 32) | 2);
}

#[test]
fn construction_requires_primary_to_be_faster() {
    let primary = obj(1, 5.0);
    let secondary = obj(2, 10.0);
    assert_eq!(
        CollisionEvent::new(primary, secondary, CollisionKind::Impact, 10.0, Position::default()),
        Err(CollisionError::PrimaryNotFaster)
    );
}

#[test]
fn construction_succeeds_when_primary_is_faster_or_equal() {
    let primary = obj(1, 10.0);
    let secondary = obj(2, 10.0);
    let ev = CollisionEvent::new(primary, secondary, CollisionKind::Impact, 10.0, Position::default())
        .unwrap();
    assert_eq!(ev.pair_id, pair_id(1, 2));
}
