use super::config::Difficulty;
use super::evolution::EvolutionStage;
use super::state::CollisionType;

/// Notable moments the core reports to outer collaborators
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    SessionStarted { difficulty: Difficulty },
    Evolved { stage: EvolutionStage },
    Milestone { score: u32 },
    GameOver { score: u32, cause: CollisionType },
    /// The snake covers every cell; the run ends with its last point scored
    BoardFilled { score: u32 },
}

impl GameEvent {
    /// Final score if this event ends the run
    pub fn final_score(&self) -> Option<u32> {
        match self {
            GameEvent::GameOver { score, .. } | GameEvent::BoardFilled { score } => Some(*score),
            _ => None,
        }
    }
}

impl GameEvent {
    /// Short natural-language description used as commentary context
    pub fn context(&self) -> String {
        match self {
            GameEvent::SessionStarted { difficulty } => {
                format!("Player connected. Difficulty: {}", difficulty.label())
            }
            GameEvent::Evolved { stage } => {
                format!("System evolved! Current build: {}", stage.name)
            }
            GameEvent::Milestone { score } => {
                format!("Data upload complete. Cache: {score}")
            }
            GameEvent::GameOver { score, cause } => {
                let cause = match cause {
                    CollisionType::Wall => "wall collision",
                    CollisionType::SelfCollision => "self collision",
                };
                format!("Signal lost. Final data: {score}. Cause: {cause}.")
            }
            GameEvent::BoardFilled { score } => {
                format!("Grid saturated. Final data: {score}. No free sector left.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_strings() {
        let started = GameEvent::SessionStarted {
            difficulty: Difficulty::Medium,
        };
        assert_eq!(started.context(), "Player connected. Difficulty: HACKER");

        let over = GameEvent::GameOver {
            score: 12,
            cause: CollisionType::Wall,
        };
        assert_eq!(
            over.context(),
            "Signal lost. Final data: 12. Cause: wall collision."
        );

        let evolved = GameEvent::Evolved {
            stage: EvolutionStage::for_score(10),
        };
        assert!(evolved.context().contains("v2.0 Venom"));

        let filled = GameEvent::BoardFilled { score: 8 };
        assert_eq!(
            filled.context(),
            "Grid saturated. Final data: 8. No free sector left."
        );
    }

    #[test]
    fn test_final_score_only_on_terminal_events() {
        let over = GameEvent::GameOver {
            score: 3,
            cause: CollisionType::SelfCollision,
        };
        assert_eq!(over.final_score(), Some(3));
        assert_eq!(GameEvent::BoardFilled { score: 8 }.final_score(), Some(8));
        assert_eq!(GameEvent::Milestone { score: 5 }.final_score(), None);
    }
}
