//! Aggro detection around an entity.

use crate::state::{EntityId, Position};

/// Sphere around its owner that notices other entities.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggroArea {
    pub radius: f32,
}

impl AggroArea {
    pub const fn new(radius: f32) -> Self {
        Self { radius }
    }

    pub fn contains(&self, center: Position, point: Position) -> bool {
        center.distance(point) <= self.radius
    }

    /// Candidates inside the area, excluding the owner itself.
    pub fn detect<I>(
        &self,
        owner: EntityId,
        center: Position,
        candidates: I,
    ) -> impl Iterator<Item = (EntityId, Position)>
    where
        I: IntoIterator<Item = (EntityId, Position)>,
    {
        let area = *self;
        candidates
            .into_iter()
            .filter(move |&(id, position)| id != owner && area.contains(center, position))
    }

    /// Closest candidate inside the area. Ties go to the first one seen.
    pub fn nearest<I>(&self, owner: EntityId, center: Position, candidates: I) -> Option<EntityId>
    where
        I: IntoIterator<Item = (EntityId, Position)>,
    {
        self.detect(owner, center, candidates)
            .map(|(id, position)| (id, center.distance(position)))
            .fold(None, |best: Option<(EntityId, f32)>, (id, distance)| match best {
                Some((_, best_distance)) if best_distance <= distance => best,
                _ => Some((id, distance)),
            })
            .map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<(EntityId, Position)> {
        vec![
            (EntityId(1), Position::ORIGIN),
            (EntityId(2), Position::new(3.0, 0.0, 0.0)),
            (EntityId(3), Position::new(0.0, 0.0, 2.0)),
            (EntityId(4), Position::new(9.0, 0.0, 0.0)),
        ]
    }

    #[test]
    fn detect_excludes_owner_and_far_entities() {
        let area = AggroArea::new(5.0);
        let found: Vec<_> = area
            .detect(EntityId(1), Position::ORIGIN, candidates())
            .map(|(id, _)| id)
            .collect();
        assert_eq!(found, vec![EntityId(2), EntityId(3)]);
    }

    #[test]
    fn nearest_picks_closest() {
        let area = AggroArea::new(5.0);
        assert_eq!(
            area.nearest(EntityId(1), Position::ORIGIN, candidates()),
            Some(EntityId(3))
        );
        assert_eq!(
            AggroArea::new(1.0).nearest(EntityId(1), Position::ORIGIN, candidates()),
            None
        );
    }
}
