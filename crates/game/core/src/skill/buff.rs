use super::bonus::StatBonuses;
use super::hash::SkillHash;
use super::template::BuffSpec;
use crate::state::Tick;

/// Active timed stat modifier on one entity.
///
/// Bonus values are frozen at creation so a buff keeps its strength even if
/// the granting skill is upgraded while it runs.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Buff {
    pub hash: SkillHash,
    pub level: u32,
    pub buff_time_end: Tick,
    pub remain_after_death: bool,
    pub bonuses: StatBonuses,
}

impl Buff {
    pub fn from_spec(hash: SkillHash, spec: &BuffSpec, level: u32, now: Tick) -> Self {
        let duration = spec.buff_time.get(level).max(0) as u64;
        Self {
            hash,
            level,
            buff_time_end: now + duration,
            remain_after_death: spec.remain_after_death,
            bonuses: spec.bonuses.at(level),
        }
    }

    pub fn buff_time_remaining(&self, now: Tick) -> u64 {
        now.millis_until(self.buff_time_end)
    }

    pub fn is_expired(&self, now: Tick) -> bool {
        self.buff_time_remaining(now) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::curve::LinearInt;
    use crate::skill::template::StatCurves;

    #[test]
    fn buff_expires_at_end_time() {
        let spec = BuffSpec {
            buff_time: LinearInt::new(3_000, 1_000),
            remain_after_death: true,
            bonuses: StatCurves {
                defense: LinearInt::new(5, 5),
                ..StatCurves::default()
            },
        };
        let buff = Buff::from_spec(SkillHash::of("stoneskin"), &spec, 2, Tick(500));

        assert_eq!(buff.buff_time_end, Tick(4_500));
        assert_eq!(buff.bonuses.defense, 10);
        assert_eq!(buff.buff_time_remaining(Tick(4_000)), 500);
        assert!(!buff.is_expired(Tick(4_499)));
        assert!(buff.is_expired(Tick(4_500)));
    }
}
