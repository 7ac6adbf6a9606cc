//! Evolution tiers unlocked by score thresholds

/// A cosmetic stage of the snake, selected by score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvolutionStage {
    /// Position in the stage table, 0 for the starting build
    pub tier: usize,
    /// Lowest score at which this stage is active
    pub threshold: u32,
    pub name: &'static str,
}

/// Stage table ordered by ascending threshold, starting at 0
pub const EVOLUTION_STAGES: [EvolutionStage; 4] = [
    EvolutionStage {
        tier: 0,
        threshold: 0,
        name: "v1.0 Basic",
    },
    EvolutionStage {
        tier: 1,
        threshold: 10,
        name: "v2.0 Venom",
    },
    EvolutionStage {
        tier: 2,
        threshold: 20,
        name: "v3.0 Phantom",
    },
    EvolutionStage {
        tier: 3,
        threshold: 30,
        name: "v4.0 Golden Titan",
    },
];

impl EvolutionStage {
    /// The stage every game starts in
    pub fn initial() -> Self {
        EVOLUTION_STAGES[0]
    }

    /// Highest-threshold stage whose threshold does not exceed `score`
    pub fn for_score(score: u32) -> Self {
        EVOLUTION_STAGES
            .iter()
            .rev()
            .find(|stage| score >= stage.threshold)
            .copied()
            .unwrap_or_else(Self::initial)
    }

    pub fn is_final(&self) -> bool {
        self.tier + 1 == EVOLUTION_STAGES.len()
    }
}
