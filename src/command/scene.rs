//! Scene selection from a spoken transcript

use crate::core::config::SceneRule;

/// Pick the scene named by the transcript
///
/// Rules are checked in order and the first rule with a keyword contained in
/// the transcript wins. The transcript is expected to be lowercase already.
pub fn select_scene<'a>(transcript: &str, rules: &'a [SceneRule], fallback: &'a str) -> &'a str {
    rules
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| transcript.contains(k.as_str())))
        .map(|rule| rule.scene.as_str())
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::default_scene_rules;

    fn pick(transcript: &str) -> String {
        select_scene(transcript, &default_scene_rules(), "FireDrill").to_string()
    }

    #[test]
    fn test_lobby() {
        assert_eq!(pick("take me to the lobby"), "Lobby");
    }

    #[test]
    fn test_menu() {
        assert_eq!(pick("open the main menu"), "MainMenu");
    }

    #[test]
    fn test_training_and_firedrill() {
        assert_eq!(pick("go to training area"), "FireDrill");
        assert_eq!(pick("start the firedrill"), "FireDrill");
    }

    #[test]
    fn test_unrelated_text_uses_fallback() {
        assert_eq!(pick("load the helicopter"), "FireDrill");
        assert_eq!(pick(""), "FireDrill");
    }

    #[test]
    fn test_lobby_beats_menu() {
        assert_eq!(pick("menu in the lobby"), "Lobby");
    }

    #[test]
    fn test_menu_beats_training() {
        assert_eq!(pick("training menu"), "MainMenu");
    }

    #[test]
    fn test_custom_rules_and_fallback() {
        let rules = vec![SceneRule::new(&["deck", "helipad"], "HeliDeck")];
        assert_eq!(select_scene("the helipad please", &rules, "Lobby"), "HeliDeck");
        assert_eq!(select_scene("the lobby please", &rules, "Lobby"), "Lobby");
    }
}
