use ratatui::style::Color;

use crate::game::EvolutionStage;

/// Head and body colors for each evolution tier
pub fn stage_colors(stage: &EvolutionStage) -> (Color, Color) {
    match stage.tier {
        0 => (Color::LightCyan, Color::Cyan),
        1 => (Color::LightGreen, Color::Green),
        2 => (Color::LightMagenta, Color::Magenta),
        _ => (Color::LightYellow, Color::Yellow),
    }
}

pub const FOOD: Color = Color::LightRed;
pub const AI_TEXT: Color = Color::Magenta;
pub const SYSTEM_TEXT: Color = Color::Cyan;
pub const MUTED: Color = Color::DarkGray;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::EVOLUTION_STAGES;

    #[test]
    fn test_each_stage_has_distinct_head() {
        let heads: Vec<Color> = EVOLUTION_STAGES.iter().map(|s| stage_colors(s).0).collect();
        for (i, a) in heads.iter().enumerate() {
            for b in &heads[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
