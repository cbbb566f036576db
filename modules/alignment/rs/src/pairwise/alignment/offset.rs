use derive_getters::Dissolve;
use derive_more::{Constructor, From, Into};

use alnkit_core_rs::num::PrimUInt;

/// Offset of an alignment column in sequence coordinates
#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Debug,
    Hash,
    Default,
    Constructor,
    Dissolve,
    From,
    Into,
)]
pub struct Offset<TargetIdx: PrimUInt, QueryIdx: PrimUInt> {
    pub target: TargetIdx,
    pub query: QueryIdx,
}
